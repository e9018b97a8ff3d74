//! Card instances - runtime card state.
//!
//! `CardInstance` is one physical copy of a card in the duel. It points at
//! its shared `CardDefinition` and carries the live overlay: stat
//! modifiers and transient flags. The overlay is wiped whenever the card
//! leaves the field, so a card that returns to the field starts clean.
//!
//! Where the instance *is* lives in the zone store, not here, so there is
//! exactly one source of truth for location.

use serde::{Deserialize, Serialize};

use super::definition::CardId;
use crate::core::entity::InstanceId;

/// Stat overrides applied on top of the definition.
///
/// `None` means "use the printed value".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub level: Option<i64>,
    pub attack: Option<i64>,
    pub defense: Option<i64>,
}

impl Modifiers {
    /// True if no override is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.attack.is_none() && self.defense.is_none()
    }
}

/// Transient per-instance flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceFlags {
    /// Banish this card instead of sending it anywhere else when it leaves
    /// the field.
    pub banish_on_leave: bool,

    /// Set when the card arrived on the field by Pendulum Summon.
    pub pendulum_summoned: bool,
}

impl InstanceFlags {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.banish_on_leave && !self.pendulum_summoned
    }
}

/// A card instance in a duel.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID for this copy.
    pub id: InstanceId,

    /// Reference to the card definition.
    pub card_id: CardId,

    #[serde(default)]
    pub modifiers: Modifiers,

    #[serde(default)]
    pub flags: InstanceFlags,

    /// Face-up in the extra deck (only meaningful there).
    #[serde(default)]
    pub face_up: bool,
}

impl CardInstance {
    /// Create a clean instance.
    #[must_use]
    pub fn new(id: InstanceId, card_id: CardId) -> Self {
        Self {
            id,
            card_id,
            modifiers: Modifiers::default(),
            flags: InstanceFlags::default(),
            face_up: false,
        }
    }

    /// True if any modifier or flag is set.
    #[must_use]
    pub fn has_overlay(&self) -> bool {
        !self.modifiers.is_empty() || !self.flags.is_empty()
    }

    /// Clear modifiers and transient flags (the card left the field).
    pub fn clear_overlay(&mut self) {
        self.modifiers = Modifiers::default();
        self.flags = InstanceFlags::default();
    }
}
