//! Effect resolution: card handlers, their registry and dispatch.
//!
//! ## Key Types
//!
//! - `CardEffect`: The capability each card effect implements
//! - `TriggerContext`: What happened to the card (reason, zones, summon)
//! - `Reason`: Moved / Manual / Triggered / AsMaterial
//! - `EffectRegistry`: Card id to handler, built once

mod dispatch;
pub mod handler;
pub mod registry;

pub use handler::{CardEffect, Reason, TriggerContext};
pub use registry::{EffectRegistry, EffectRegistryBuilder};
