//! The duel engine.
//!
//! `Engine` owns everything about one solo duel: the state aggregate, the
//! log feed, the undo history, the interaction queue and the two read-only
//! registries. Hosts drive it through its public methods and render from
//! `state()`, `logs()` and `open_request()`.
//!
//! ## Example
//!
//! ```
//! use solo_duel::cards::{CardDefinition, CardId, CardRegistry};
//! use solo_duel::core::EngineConfig;
//! use solo_duel::effects::EffectRegistry;
//! use solo_duel::engine::Engine;
//! use solo_duel::rules::MoveRequest;
//! use solo_duel::zones::ZoneKind;
//!
//! let scout = CardId::new(1);
//! let cards = CardRegistry::from_definitions(vec![
//!     CardDefinition::monster(scout, "Vale Scout", 4, 1600, 1000),
//! ]);
//! let mut engine = Engine::new(cards, EffectRegistry::new(), EngineConfig::new());
//! engine.init_duel(&[scout]).unwrap();
//!
//! let drawn = engine.draw().unwrap().unwrap();
//! engine.move_card(MoveRequest::new(drawn, ZoneKind::MonsterZone).at(2)).unwrap();
//!
//! assert!(engine.state().normal_summon_used);
//! assert_eq!(engine.logs().last().unwrap(), "Normal Summoned Vale Scout to Monster Zone 3");
//! ```

use std::rc::Rc;

use tracing::{debug, info};

use crate::cards::{CardId, CardRegistry, InstanceFlags, Modifiers};
use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::core::rng::GameRng;
use crate::core::state::{DuelState, DuelView, UsageKey};
use crate::core::EngineConfig;
use crate::effects::EffectRegistry;
use crate::history::{History, Snapshot};
use crate::interaction::{ChainEntry, InteractionPhase, InteractionQueue, Request};
use crate::rules::{MoveRequest, OperationContext};
use crate::zones::{Location, ZoneKind, ZonePosition};

/// One solo duel.
pub struct Engine {
    pub(crate) state: DuelState,
    pub(crate) logs: Vec<String>,
    pub(crate) history: History,
    pub(crate) interaction: InteractionQueue,
    pub(crate) cards: Rc<CardRegistry>,
    pub(crate) effects: Rc<EffectRegistry>,
    pub(crate) config: EngineConfig,
    pub(crate) rng: GameRng,
    /// Number of effects currently running (moves made inside one are
    /// dispatched as `Triggered`).
    pub(crate) effect_depth: u32,
}

impl Engine {
    /// Create an engine with an empty board.
    #[must_use]
    pub fn new(cards: CardRegistry, effects: EffectRegistry, config: EngineConfig) -> Self {
        Self {
            state: DuelState::new(),
            logs: Vec::new(),
            history: History::new(config.max_history),
            interaction: InteractionQueue::new(),
            cards: Rc::new(cards),
            effects: Rc::new(effects),
            rng: GameRng::new(config.seed),
            config,
            effect_depth: 0,
        }
    }

    /// Start a duel from a deck list.
    ///
    /// Extra Deck monsters go to the Extra Deck, everything else to the
    /// Deck, in list order. Instance ids are assigned from 1 in list order.
    /// Zones, history, logs and queues are all reset.
    pub fn init_duel(&mut self, deck: &[CardId]) -> Result<(), DuelError> {
        for card in deck {
            if !self.cards.contains(*card) {
                return Err(self.reject(DuelError::UnknownCard(*card)));
            }
        }

        let mut state = DuelState::new();
        for card in deck {
            let id = state.alloc_instance(*card);
            let zone = if self.cards.get(*card).is_some_and(|d| d.is_extra_deck()) {
                ZoneKind::ExtraDeck
            } else {
                ZoneKind::Deck
            };
            state.zones.push(zone, id, ZonePosition::Bottom);
        }

        self.state = state;
        self.logs.clear();
        self.history = History::new(self.config.max_history);
        self.interaction = InteractionQueue::new();
        self.rng = GameRng::new(self.config.seed);
        self.effect_depth = 0;
        info!(
            cards = deck.len(),
            extra = self.state.zones.extra_deck.len(),
            "duel initialized"
        );
        Ok(())
    }

    // === Accessors ===

    #[must_use]
    pub fn state(&self) -> &DuelState {
        &self.state
    }

    /// Read-only view of the state with card definitions.
    #[must_use]
    pub fn view(&self) -> DuelView<'_> {
        DuelView::new(&self.state, &self.cards)
    }

    /// The user-visible log feed.
    #[must_use]
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    /// Undo snapshots, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Snapshot] {
        self.history.snapshots()
    }

    #[must_use]
    pub fn open_request(&self) -> Option<&Request> {
        self.interaction.open()
    }

    #[must_use]
    pub fn interaction_phase(&self) -> InteractionPhase {
        self.interaction.phase()
    }

    /// Requests waiting behind the open one.
    #[must_use]
    pub fn queued_requests(&self) -> usize {
        self.interaction.queued()
    }

    #[must_use]
    pub fn pending_chain(&self) -> &[ChainEntry] {
        self.interaction.chain()
    }

    /// The "effect resolving" highlight.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.interaction.is_resolving()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    #[must_use]
    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    // === Log feed and usage ===

    /// Append a line to the log feed.
    pub fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        debug!(index = self.logs.len(), %line, "log line");
        self.logs.push(line);
    }

    /// Consume one use of a once-per-turn slot.
    pub fn record_usage(&mut self, key: UsageKey) {
        self.state.record_usage(key);
    }

    // === Deck actions ===

    /// Draw the top card of the Deck.
    ///
    /// Drawing from an empty Deck is logged and changes nothing.
    pub fn draw(&mut self) -> Result<Option<InstanceId>, DuelError> {
        self.run_batched(|engine| {
            let Some(top) = engine.state.zones.deck.front().copied() else {
                engine.log("The Deck is empty");
                return Ok(None);
            };
            let name = engine.view().name(top);
            let request = MoveRequest::new(top, ZoneKind::Hand).with_hint(Location::zone(ZoneKind::Deck, 0));
            engine.move_with(request, OperationContext::default().quiet())?;
            engine.log(format!("Drew {name}"));
            Ok(Some(top))
        })
    }

    /// Shuffle the Deck with the seeded RNG.
    pub fn shuffle_deck(&mut self) -> Result<(), DuelError> {
        self.run_batched(|engine| {
            engine.checkpoint(&OperationContext::default());
            let mut order: Vec<InstanceId> = engine.state.zones.deck.iter().copied().collect();
            engine.rng.shuffle(&mut order);
            engine.state.zones.set_deck(order);
            engine.log("Shuffled the Deck");
            Ok(())
        })
    }

    // === Copy management ===

    /// Add a new copy of a card to a list zone.
    ///
    /// Extra Deck monsters headed for the Deck or the hand go to the Extra
    /// Deck instead.
    pub fn add_copy(&mut self, card: CardId, zone: ZoneKind) -> Result<InstanceId, DuelError> {
        self.run_batched(|engine| {
            let def = engine.cards.lookup(card)?;
            if zone.is_field() {
                return Err(DuelError::IllegalPlacement(format!(
                    "new copies can only be added to the Deck, hand, Graveyard, Banished or Extra Deck, not the {zone}"
                )));
            }
            let zone = match zone {
                ZoneKind::Deck | ZoneKind::Hand if def.is_extra_deck() => ZoneKind::ExtraDeck,
                other => other,
            };
            let name = def.name.clone();

            engine.checkpoint(&OperationContext::default());
            let id = engine.state.alloc_instance(card);
            engine.state.zones.push(zone, id, ZonePosition::Bottom);
            engine.log(format!("Added a copy of {name} to the {zone}"));
            Ok(id)
        })
    }

    /// Remove an instance from the duel. Its materials go to the Graveyard.
    pub fn remove_instance(&mut self, id: InstanceId) -> Result<(), DuelError> {
        self.run_batched(|engine| {
            if engine.state.instance(id).is_none() {
                return Err(DuelError::UnknownInstance(id));
            }
            let at = engine.state.zones.locate(id).ok_or(DuelError::StaleReference(id))?;
            let name = engine.view().name(id);

            engine.checkpoint(&OperationContext::default());
            engine.state.zones.take(at, id);
            engine.cascade_materials(id);
            engine.state.instances.remove(&id);
            engine.log(format!("Removed {name} from the duel"));
            Ok(())
        })
    }

    // === Overlay edits ===

    /// Override a field card's level, ATK or DEF.
    pub fn set_modifiers(&mut self, id: InstanceId, modifiers: Modifiers) -> Result<(), DuelError> {
        self.run_batched(|engine| {
            let name = engine.on_field(id)?;
            engine.checkpoint(&OperationContext::default());
            if let Some(instance) = engine.state.instance_mut(id) {
                instance.modifiers = modifiers;
            }

            let mut changes = Vec::new();
            if let Some(level) = modifiers.level {
                changes.push(format!("Level {level}"));
            }
            if let Some(attack) = modifiers.attack {
                changes.push(format!("ATK {attack}"));
            }
            if let Some(defense) = modifiers.defense {
                changes.push(format!("DEF {defense}"));
            }
            if changes.is_empty() {
                engine.log(format!("Reset the stats of {name}"));
            } else {
                engine.log(format!("Set {name} to {}", changes.join(", ")));
            }
            Ok(())
        })
    }

    /// Replace a field card's transient flags.
    pub fn set_flags(&mut self, id: InstanceId, flags: InstanceFlags) -> Result<(), DuelError> {
        self.run_batched(|engine| {
            let name = engine.on_field(id)?;
            engine.checkpoint(&OperationContext::default());
            if let Some(instance) = engine.state.instance_mut(id) {
                instance.flags = flags;
            }
            if flags.banish_on_leave {
                engine.log(format!("{name} will be banished when it leaves the field"));
            } else {
                engine.log(format!("Updated {name}"));
            }
            Ok(())
        })
    }

    fn on_field(&self, id: InstanceId) -> Result<String, DuelError> {
        if self.state.instance(id).is_none() {
            return Err(DuelError::UnknownInstance(id));
        }
        let name = self.view().name(id);
        match self.state.zones.locate(id) {
            Some(location) if location.is_field() => Ok(name),
            _ => Err(DuelError::MissingPrecondition(format!("{name} is not on the field"))),
        }
    }

    // === Turn ===

    /// End the turn: once-per-turn counters and the Normal Summon gate
    /// reset.
    pub fn end_turn(&mut self) -> Result<(), DuelError> {
        self.run_batched(|engine| {
            engine.checkpoint(&OperationContext::default());
            engine.state.advance_turn();
            let turn = engine.state.turn;
            engine.log(format!("Turn {turn} started"));
            Ok(())
        })
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("turn", &self.state.turn)
            .field("logs", &self.logs.len())
            .field("history", &self.history.len())
            .field("phase", &self.interaction.phase())
            .finish_non_exhaustive()
    }
}
