//! Sample card pool.
//!
//! Two small archetypes, "Vale" and "Ember", with enough cards to drive
//! every summon procedure and the common effect patterns:
//!
//! - search on summon (`Vale Scout`)
//! - material triggers that chain (`Ember Spark`, `Ember Ash`,
//!   `Ember Herald`, with Herald resolving before Spark)
//! - a Fusion spell (`Vale Fusion`)
//! - a detach cost on an Xyz monster (`Vale Bastion`)
//!
//! ## Example
//!
//! ```
//! use solo_duel::games::sample;
//! use solo_duel::EngineConfig;
//!
//! let mut engine = sample::engine(EngineConfig::new().with_seed(7));
//! engine.init_duel(&sample::deck()).unwrap();
//!
//! assert_eq!(engine.state().zones.extra_deck.len(), 4);
//! assert!(engine.logs().is_empty());
//! ```

pub mod cards;
pub mod effects;

pub use cards::*;
pub use effects::FUSION_MATERIAL_ZONES;

use crate::cards::CardId;
use crate::core::config::EngineConfig;
use crate::engine::Engine;

/// A 20-card main deck plus one copy of each Extra Deck monster.
#[must_use]
pub fn deck() -> Vec<CardId> {
    let mut deck = Vec::with_capacity(24);
    for (card, copies) in [
        (VALE_SCOUT, 3),
        (VALE_WARDEN, 2),
        (VALE_COLOSSUS, 2),
        (VALE_ORACLE, 1),
        (VALE_SENTINEL, 1),
        (EMBER_SPARK, 2),
        (EMBER_ASH, 2),
        (EMBER_HERALD, 2),
        (VALE_FUSION, 2),
        (VALE_TWIN_CORE, 1),
        (VALE_BANNER, 1),
        (VALE_WARD, 1),
        (VALE_CHIMERA, 1),
        (VALE_LANCER, 1),
        (VALE_BASTION, 1),
        (VALE_LINK_SPIDER, 1),
    ] {
        deck.extend(std::iter::repeat(card).take(copies));
    }
    deck
}

/// An engine loaded with the sample pool.
#[must_use]
pub fn engine(config: EngineConfig) -> Engine {
    Engine::new(cards::registry(), effects::registry(), config)
}
