//! Duel state: the single mutable aggregate.
//!
//! ## DuelState
//!
//! Everything a snapshot captures:
//! - Zone store (card locations and materials)
//! - Card instances with their overlays
//! - Usage counters for once-per-turn effects
//! - Summon bookkeeping (normal summon gate, Pendulum Summon count)
//!
//! Uses `im` persistent data structures, so cloning for a snapshot is
//! O(1) and shares structure with the live state.
//!
//! ## DuelView
//!
//! A read-only pairing of the state with the card definition table. All
//! rule checks read effective values through it.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::entity::InstanceId;
use crate::cards::{CardDefinition, CardId, CardInstance, CardRegistry};
use crate::zones::{Location, ZoneStore};

/// Key for a once-per-turn usage counter: card identity plus effect slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsageKey {
    pub card: CardId,
    pub slot: u8,
}

impl UsageKey {
    #[must_use]
    pub const fn new(card: CardId, slot: u8) -> Self {
        Self { card, slot }
    }
}

impl std::fmt::Display for UsageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.card.0, self.slot)
    }
}

/// The complete duel aggregate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelState {
    pub zones: ZoneStore,

    /// Card instances by id.
    pub instances: OrdMap<InstanceId, CardInstance>,

    /// Usage counters, keyed by the rendered `UsageKey`.
    pub usage: OrdMap<String, u32>,

    /// Normal Summon gate for the current turn.
    pub normal_summon_used: bool,

    /// Number of Pendulum Summons performed. Replay watches this to cue
    /// the Pendulum Summon animation.
    pub pendulum_summon_count: u32,

    /// Turn number (starts at 1, only advanced by `end_turn`).
    pub turn: u32,

    /// Next instance id to allocate.
    pub next_instance: InstanceId,
}

impl Default for DuelState {
    fn default() -> Self {
        Self {
            zones: ZoneStore::new(),
            instances: OrdMap::new(),
            usage: OrdMap::new(),
            normal_summon_used: false,
            pendulum_summon_count: 0,
            turn: 1,
            next_instance: InstanceId::FIRST,
        }
    }
}

impl DuelState {
    /// Create an empty duel state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Instance Management ===

    /// Allocate a new instance of `card`. It is not placed in any zone.
    pub fn alloc_instance(&mut self, card: CardId) -> InstanceId {
        let id = self.next_instance;
        self.next_instance = id.next();
        self.instances.insert(id, CardInstance::new(id, card));
        id
    }

    /// Get a card instance.
    #[must_use]
    pub fn instance(&self, id: InstanceId) -> Option<&CardInstance> {
        self.instances.get(&id)
    }

    /// Get a mutable card instance.
    pub fn instance_mut(&mut self, id: InstanceId) -> Option<&mut CardInstance> {
        self.instances.get_mut(&id)
    }

    // === Usage Counters ===

    /// How many times a usage key was consumed.
    #[must_use]
    pub fn usage_count(&self, key: UsageKey) -> u32 {
        self.usage.get(&key.to_string()).copied().unwrap_or(0)
    }

    /// Consume one use of a key.
    pub fn record_usage(&mut self, key: UsageKey) {
        let count = self.usage_count(key);
        self.usage.insert(key.to_string(), count + 1);
    }

    /// Start a new turn: usage counters and the normal summon gate reset.
    pub fn advance_turn(&mut self) {
        self.turn += 1;
        self.usage.clear();
        self.normal_summon_used = false;
    }
}

/// Read-only view of the state with access to card definitions.
#[derive(Clone, Copy)]
pub struct DuelView<'a> {
    pub state: &'a DuelState,
    pub cards: &'a CardRegistry,
}

impl<'a> DuelView<'a> {
    #[must_use]
    pub fn new(state: &'a DuelState, cards: &'a CardRegistry) -> Self {
        Self { state, cards }
    }

    /// The definition behind an instance.
    #[must_use]
    pub fn definition(&self, id: InstanceId) -> Option<&'a CardDefinition> {
        let instance = self.state.instance(id)?;
        self.cards.get(instance.card_id)
    }

    #[must_use]
    pub fn card_id(&self, id: InstanceId) -> Option<CardId> {
        self.state.instance(id).map(|i| i.card_id)
    }

    /// Display name, falling back to the instance id.
    #[must_use]
    pub fn name(&self, id: InstanceId) -> String {
        self.definition(id)
            .map_or_else(|| id.to_string(), |d| d.name.clone())
    }

    #[must_use]
    pub fn location(&self, id: InstanceId) -> Option<Location> {
        self.state.zones.locate(id)
    }

    // === Effective values: overlay first, then the printed value ===

    #[must_use]
    pub fn effective_level(&self, id: InstanceId) -> Option<i64> {
        let instance = self.state.instance(id)?;
        instance
            .modifiers
            .level
            .or_else(|| self.definition(id).and_then(|d| d.level))
    }

    #[must_use]
    pub fn effective_attack(&self, id: InstanceId) -> Option<i64> {
        let instance = self.state.instance(id)?;
        instance
            .modifiers
            .attack
            .or_else(|| self.definition(id).and_then(|d| d.attack))
    }

    #[must_use]
    pub fn effective_defense(&self, id: InstanceId) -> Option<i64> {
        let instance = self.state.instance(id)?;
        instance
            .modifiers
            .defense
            .or_else(|| self.definition(id).and_then(|d| d.defense))
    }

    #[must_use]
    pub fn rank(&self, id: InstanceId) -> Option<i64> {
        self.definition(id).and_then(|d| d.rank)
    }

    #[must_use]
    pub fn scale(&self, id: InstanceId) -> Option<i64> {
        self.definition(id).and_then(|d| d.scale)
    }

    // === Type checks ===

    #[must_use]
    pub fn is_monster(&self, id: InstanceId) -> bool {
        self.definition(id).is_some_and(CardDefinition::is_monster)
    }

    #[must_use]
    pub fn is_pendulum(&self, id: InstanceId) -> bool {
        self.definition(id).is_some_and(CardDefinition::is_pendulum)
    }

    #[must_use]
    pub fn is_tuner(&self, id: InstanceId) -> bool {
        self.definition(id).is_some_and(CardDefinition::is_tuner)
    }

    #[must_use]
    pub fn is_extra_deck(&self, id: InstanceId) -> bool {
        self.definition(id).is_some_and(CardDefinition::is_extra_deck)
    }

    #[must_use]
    pub fn is_link(&self, id: InstanceId) -> bool {
        self.definition(id).is_some_and(|d| d.link_rating().is_some())
    }
}
