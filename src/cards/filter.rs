//! Declarative card filters.
//!
//! Filters describe which instances an effect, a summon recipe or an
//! interactive request accepts. They are plain data so they can be stored
//! in card definitions, compared in tests and re-evaluated against the live
//! state whenever a response arrives.

use serde::{Deserialize, Serialize};

use super::attributes::ARCHETYPE;
use super::definition::{CardId, CardType, Subtype};
use crate::core::entity::InstanceId;
use crate::core::state::DuelView;

/// Filter over card instances.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFilter {
    /// Accept everything.
    Any,

    // === Card type ===
    Monster,
    Spell,
    Trap,
    Subtype(Subtype),
    /// Monster with the Tuner subtype.
    Tuner,
    /// Monster without the Tuner subtype.
    NonTuner,

    // === Identity ===
    /// A copy of a specific card.
    Card(CardId),
    /// Card whose `archetype` attribute mentions the given name.
    Archetype(String),
    /// One of an explicit set of instances.
    Instances(Vec<InstanceId>),

    // === Stats (effective values) ===
    LevelAtMost(i64),
    LevelAtLeast(i64),
    LevelExactly(i64),
    /// Level strictly between the two bounds.
    LevelBetween(i64, i64),

    // === Combinators ===
    Not(Box<CardFilter>),
    AllOf(Vec<CardFilter>),
    AnyOf(Vec<CardFilter>),
}

impl CardFilter {
    /// Archetype filter.
    #[must_use]
    pub fn archetype(name: impl Into<String>) -> Self {
        CardFilter::Archetype(name.into())
    }

    /// Combine with another filter (both must match).
    #[must_use]
    pub fn and(self, other: CardFilter) -> Self {
        match self {
            CardFilter::Any => other,
            CardFilter::AllOf(mut all) => {
                all.push(other);
                CardFilter::AllOf(all)
            }
            first => CardFilter::AllOf(vec![first, other]),
        }
    }

    /// Exclude one instance (usually the effect's own card).
    #[must_use]
    pub fn except(self, id: InstanceId) -> Self {
        self.and(CardFilter::Not(Box::new(CardFilter::Instances(vec![id]))))
    }

    /// Evaluate against the live state.
    #[must_use]
    pub fn matches(&self, view: &DuelView<'_>, id: InstanceId) -> bool {
        let Some(def) = view.definition(id) else {
            return false;
        };
        match self {
            CardFilter::Any => true,
            CardFilter::Monster => def.card_type == CardType::Monster,
            CardFilter::Spell => def.card_type == CardType::Spell,
            CardFilter::Trap => def.card_type == CardType::Trap,
            CardFilter::Subtype(s) => def.has_subtype(*s),
            CardFilter::Tuner => def.is_tuner(),
            CardFilter::NonTuner => def.is_monster() && !def.is_tuner(),
            CardFilter::Card(card) => def.id == *card,
            CardFilter::Archetype(name) => def
                .get_attr(ARCHETYPE)
                .is_some_and(|v| v.mentions(name)),
            CardFilter::Instances(ids) => ids.contains(&id),
            CardFilter::LevelAtMost(n) => view.effective_level(id).is_some_and(|l| l <= *n),
            CardFilter::LevelAtLeast(n) => view.effective_level(id).is_some_and(|l| l >= *n),
            CardFilter::LevelExactly(n) => view.effective_level(id) == Some(*n),
            CardFilter::LevelBetween(low, high) => view
                .effective_level(id)
                .is_some_and(|l| *low < l && l < *high),
            CardFilter::Not(inner) => !inner.matches(view, id),
            CardFilter::AllOf(all) => all.iter().all(|f| f.matches(view, id)),
            CardFilter::AnyOf(any) => any.iter().any(|f| f.matches(view, id)),
        }
    }
}

impl Default for CardFilter {
    fn default() -> Self {
        CardFilter::Any
    }
}
