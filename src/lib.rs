//! # solo-duel
//!
//! Duel-state engine for a solo trading card game simulator.
//!
//! One player moves cards between zones, activates effects and performs
//! Special Summons while the engine enforces placement rules, keeps a log
//! feed and records every committed change for undo, jump-to-log and
//! replay. There is no opponent, no phases and no battle.
//!
//! ## Design Principles
//!
//! 1. **Single Mutation Path**: Every zone change goes through the move
//!    engine, which validates, snapshots, logs and dispatches triggers.
//!
//! 2. **Commit After Choice**: Multi-step procedures ask every question
//!    first and change the board once, as one undo unit.
//!
//! 3. **Data-Driven Cards**: Card data is static; handlers are looked up by
//!    card id from a registry built at startup.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: The state aggregate clones in O(1)
//!   via `im`, so every commit can be snapshotted.
//!
//! - **Continuations**: Player questions carry a boxed continuation that
//!   re-reads the live state when the answer arrives.
//!
//! ## Modules
//!
//! - `core`: Instance ids, state aggregate, RNG, configuration, errors
//! - `zones`: Board layout, locations and link geometry
//! - `cards`: Card definitions, instances, filters and registry
//! - `rules`: Placement rules and the move engine
//! - `effects`: Card effect handlers and dispatch
//! - `interaction`: Requests, the pending chain and the modal queue
//! - `summons`: Fusion, Synchro, Xyz, Link and Pendulum procedures
//! - `history`: Undo, jump-to-log, replay and archives
//! - `games`: Card pools built on the engine

pub mod core;
pub mod zones;
pub mod cards;
pub mod rules;
pub mod effects;
pub mod interaction;
pub mod summons;
pub mod history;
pub mod engine;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    DuelError, DuelState, DuelView, EngineConfig,
    GameRng, GameRngState,
    InstanceId, UsageKey,
};

pub use crate::zones::{Location, Slot, ZoneKind, ZonePosition, ZoneStore};

pub use crate::cards::{
    CardId, CardType, Subtype, LinkMarker, CardDefinition, CardInstance, CardFilter,
    CardRegistry, AttributeKey, AttributeValue, Attributes, InstanceFlags, Modifiers,
};

pub use crate::rules::{MoveRequest, Moved, OperationContext, SummonVariant};

pub use crate::effects::{CardEffect, EffectRegistry, EffectRegistryBuilder, Reason, TriggerContext};

pub use crate::interaction::{
    ChainEntry, ChainEntryId, GroupRule, InteractionPhase, PickCount,
    Prompt, Request, RequestId, RequestKind, Response, Selector,
};

pub use crate::history::{
    Archive, ArchiveStore, MemoryArchiveStore,
    FrameKind, Replay, ReplayFrame, History, Snapshot,
};

pub use crate::engine::Engine;
