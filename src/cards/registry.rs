//! Card definition table.
//!
//! The `CardRegistry` is the engine's read-only view of the external card
//! content table: card id to definition. The engine never writes to it.

use rustc_hash::FxHashMap;
use tracing::warn;

use super::definition::{CardDefinition, CardId};
use crate::core::error::DuelError;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use solo_duel::cards::{CardRegistry, CardDefinition, CardId};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::monster(CardId::new(1), "Vale Scout", 4, 1600, 1000));
///
/// let found = registry.get(CardId::new(1)).unwrap();
/// assert_eq!(found.name, "Vale Scout");
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, CardDefinition>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from the card table.
    ///
    /// Later definitions replace earlier ones with the same id.
    #[must_use]
    pub fn from_definitions(definitions: impl IntoIterator<Item = CardDefinition>) -> Self {
        let mut registry = Self::new();
        for card in definitions {
            registry.register(card);
        }
        registry
    }

    /// Add a definition, returning the one it replaced.
    pub fn register(&mut self, card: CardDefinition) -> Option<CardDefinition> {
        let replaced = self.cards.insert(card.id, card);
        if let Some(old) = &replaced {
            warn!(id = %old.id, name = %old.name, "card definition replaced");
        }
        replaced
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&CardDefinition> {
        self.cards.get(&id)
    }

    /// Like `get`, with an `UnknownCard` error for missing ids.
    pub fn lookup(&self, id: CardId) -> Result<&CardDefinition, DuelError> {
        self.cards.get(&id).ok_or(DuelError::UnknownCard(id))
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Find a card by its exact name.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&CardDefinition> {
        self.cards.values().find(|c| c.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }
}
