//! Card definitions - static card data.
//!
//! `CardDefinition` holds the printed properties of a card: its type,
//! subtypes, stats, link arrows and text. Many instances can share one
//! definition. Live changes (boosted attack, changed level) never touch the
//! definition; they go through the instance overlay in `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::attributes::{AttributeKey, AttributeValue, Attributes};
use super::filter::CardFilter;

/// Unique identifier for a card definition.
///
/// This identifies the printed card, not a copy of it in a duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Top-level card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Monster,
    Spell,
    Trap,
}

/// Card subtype. A card can carry several (e.g. Pendulum + Effect).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Subtype {
    Normal,
    Effect,
    Ritual,
    Fusion,
    Synchro,
    Xyz,
    Link,
    Pendulum,
    Tuner,
    Field,
    Continuous,
    QuickPlay,
    Equip,
}

impl Subtype {
    /// Subtypes that live in the extra deck.
    pub const EXTRA_DECK: [Subtype; 4] = [Subtype::Fusion, Subtype::Synchro, Subtype::Xyz, Subtype::Link];
}

/// Link arrow direction, as seen by the card's controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkMarker {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use solo_duel::cards::{CardDefinition, CardId, Subtype};
///
/// let dragon = CardDefinition::monster(CardId::new(1), "Azure Wyrm", 7, 2500, 2000)
///     .with_subtype(Subtype::Effect)
///     .with_attr("archetype", "Wyrm");
///
/// assert_eq!(dragon.level, Some(7));
/// assert!(!dragon.is_extra_deck());
/// assert_eq!(dragon.get_text("archetype"), Some("Wyrm"));
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display and log lines).
    pub name: String,

    pub card_type: CardType,

    pub subtypes: SmallVec<[Subtype; 4]>,

    pub attack: Option<i64>,
    pub defense: Option<i64>,
    pub level: Option<i64>,
    pub rank: Option<i64>,

    /// Pendulum scale (both scales are always equal on these cards).
    pub scale: Option<i64>,

    /// Link arrows. The link rating is the number of arrows.
    pub link_markers: SmallVec<[LinkMarker; 8]>,

    /// Fusion recipe: one filter per material slot.
    #[serde(default)]
    pub fusion_materials: Vec<CardFilter>,

    #[serde(default)]
    pub description: String,

    /// Image reference for the rendering layer.
    #[serde(default)]
    pub image: Option<String>,

    /// Free-form properties (archetype, substitution rules, ...).
    #[serde(default)]
    pub attributes: Attributes,
}

impl CardDefinition {
    /// Create a bare definition of the given type.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            card_type,
            subtypes: SmallVec::new(),
            attack: None,
            defense: None,
            level: None,
            rank: None,
            scale: None,
            link_markers: SmallVec::new(),
            fusion_materials: Vec::new(),
            description: String::new(),
            image: None,
            attributes: Attributes::default(),
        }
    }

    /// Create a main-deck monster.
    #[must_use]
    pub fn monster(id: CardId, name: impl Into<String>, level: i64, attack: i64, defense: i64) -> Self {
        let mut card = Self::new(id, name, CardType::Monster);
        card.level = Some(level);
        card.attack = Some(attack);
        card.defense = Some(defense);
        card
    }

    /// Create a spell of the given subtypes.
    #[must_use]
    pub fn spell(id: CardId, name: impl Into<String>) -> Self {
        Self::new(id, name, CardType::Spell)
    }

    /// Create a trap.
    #[must_use]
    pub fn trap(id: CardId, name: impl Into<String>) -> Self {
        Self::new(id, name, CardType::Trap)
    }

    /// Add a subtype (builder pattern).
    #[must_use]
    pub fn with_subtype(mut self, subtype: Subtype) -> Self {
        if !self.subtypes.contains(&subtype) {
            self.subtypes.push(subtype);
        }
        self
    }

    /// Turn this monster into a Pendulum monster with the given scale.
    #[must_use]
    pub fn with_scale(mut self, scale: i64) -> Self {
        self.scale = Some(scale);
        self.with_subtype(Subtype::Pendulum)
    }

    /// Use a rank instead of a level (Xyz monsters).
    #[must_use]
    pub fn with_rank(mut self, rank: i64) -> Self {
        self.rank = Some(rank);
        self.level = None;
        self.with_subtype(Subtype::Xyz)
    }

    /// Give this monster link arrows; clears level and defense.
    #[must_use]
    pub fn with_link_markers(mut self, markers: &[LinkMarker]) -> Self {
        self.link_markers = SmallVec::from_slice(markers);
        self.level = None;
        self.defense = None;
        self.with_subtype(Subtype::Link)
    }

    #[must_use]
    pub fn with_attack(mut self, attack: i64) -> Self {
        self.attack = Some(attack);
        self
    }

    #[must_use]
    pub fn with_stats(mut self, attack: i64, defense: i64) -> Self {
        self.attack = Some(attack);
        self.defense = Some(defense);
        self
    }

    /// Set the fusion recipe.
    #[must_use]
    pub fn with_fusion_materials(mut self, materials: Vec<CardFilter>) -> Self {
        self.fusion_materials = materials;
        self.with_subtype(Subtype::Fusion)
    }

    #[must_use]
    pub fn with_description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with_attr(
        mut self,
        key: impl Into<AttributeKey>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Check a subtype.
    #[must_use]
    pub fn has_subtype(&self, subtype: Subtype) -> bool {
        self.subtypes.contains(&subtype)
    }

    #[must_use]
    pub fn is_monster(&self) -> bool {
        self.card_type == CardType::Monster
    }

    #[must_use]
    pub fn is_pendulum(&self) -> bool {
        self.is_monster() && self.has_subtype(Subtype::Pendulum)
    }

    #[must_use]
    pub fn is_tuner(&self) -> bool {
        self.is_monster() && self.has_subtype(Subtype::Tuner)
    }

    /// Fusion, Synchro, Xyz and Link monsters belong in the extra deck.
    #[must_use]
    pub fn is_extra_deck(&self) -> bool {
        self.is_monster() && Subtype::EXTRA_DECK.iter().any(|s| self.has_subtype(*s))
    }

    /// Number of link arrows, or `None` for non-Link cards.
    #[must_use]
    pub fn link_rating(&self) -> Option<i64> {
        self.has_subtype(Subtype::Link).then(|| self.link_markers.len() as i64)
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(&AttributeKey::new(key))
    }

    /// Get a boolean attribute with a default value.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get_attr(key)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    /// Get a text attribute.
    #[must_use]
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get_attr(key).and_then(|v| v.as_text())
    }
}
