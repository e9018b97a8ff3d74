//! Core engine types: entities, state, RNG, configuration and errors.
//!
//! This module contains the building blocks every other module leans on.
//! Hosts configure the engine via `EngineConfig` rather than by editing it.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;
pub mod state;

pub use config::EngineConfig;
pub use entity::InstanceId;
pub use error::DuelError;
pub use rng::{GameRng, GameRngState};
pub use state::{DuelState, DuelView, UsageKey};
