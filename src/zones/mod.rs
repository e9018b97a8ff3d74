//! Zone system for card locations.
//!
//! The board layout is fixed by the game, so zones are a closed enum
//! rather than configured ids.
//!
//! ## Key Types
//!
//! - `ZoneKind`: Which container (deck, hand, monster zone, ...)
//! - `Slot`: One single-card field slot
//! - `Location`: Where an instance is (zone position or attached material)
//! - `ZoneStore`: Every container plus the material attachment map
//! - `linked_slots`: Link-arrow geometry

pub mod links;
pub mod location;
pub mod manager;

pub use links::linked_slots;
pub use location::{Location, Slot, ZoneKind};
pub use manager::{ZonePosition, ZoneStore};
