//! The card effect capability.
//!
//! Every card with an effect maps to one `CardEffect` implementation. The
//! engine calls it after a move that involves the card, or when the player
//! activates the card directly. A handler follows the common protocol:
//!
//! 1. `precondition`: board and usage checks, no prompt if false
//! 2. `activate`: open a confirm prompt; on yes open search / target /
//!    zone prompts as needed; mutate through the move engine; record usage
//!
//! Continuations must re-read the live state at every step. Other prompts
//! may have changed the board in between.

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::core::state::{DuelView, UsageKey};
use crate::engine::Engine;
use crate::rules::SummonVariant;
use crate::zones::{Location, ZoneKind};

/// Why a handler is being invoked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Reason {
    /// The card arrived somewhere through a player move.
    Moved,
    /// The player activated the card.
    Manual,
    /// The card was moved while another effect was resolving.
    Triggered,
    /// The card was used or detached as a material.
    AsMaterial,
}

/// What happened to the card that owns the handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerContext {
    pub source: InstanceId,
    pub card: CardId,
    pub reason: Reason,
    pub variant: Option<SummonVariant>,
    pub special: bool,
    pub from: Option<Location>,
    pub to: Option<Location>,
}

impl TriggerContext {
    /// Context for a manual activation.
    #[must_use]
    pub fn manual(source: InstanceId, card: CardId, at: Option<Location>) -> Self {
        Self {
            source,
            card,
            reason: Reason::Manual,
            variant: None,
            special: false,
            from: at,
            to: at,
        }
    }

    /// Zone the card ended up in.
    #[must_use]
    pub fn destination(&self) -> Option<ZoneKind> {
        self.to.and_then(|l| l.zone_kind())
    }

    /// The card was Normal or Special Summoned by this move.
    #[must_use]
    pub fn is_summon(&self) -> bool {
        matches!(self.reason, Reason::Moved | Reason::Triggered)
            && self.destination().is_some_and(ZoneKind::is_monster_field)
            && !self.from.is_some_and(|l| l.is_field())
    }

    /// Usage key for one of this card's effect slots.
    #[must_use]
    pub fn usage_key(&self, slot: u8) -> UsageKey {
        UsageKey::new(self.card, slot)
    }
}

/// A card's effect.
pub trait CardEffect {
    /// Once-per-turn slot, or `None` for effects without a usage limit.
    fn usage_slot(&self) -> Option<u8> {
        None
    }

    /// Whether this kind of event offers the effect at all.
    fn triggers_on(&self, trigger: &TriggerContext) -> bool;

    /// Board conditions. A false result declines without a prompt.
    fn precondition(&self, _view: &DuelView<'_>, _trigger: &TriggerContext) -> bool {
        true
    }

    /// Run the effect protocol.
    fn activate(&self, engine: &mut Engine, trigger: TriggerContext) -> Result<(), DuelError>;
}
