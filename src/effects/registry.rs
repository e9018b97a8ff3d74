//! Effect registry.
//!
//! Maps card ids to their `CardEffect` handlers. Built once with
//! `EffectRegistry::builder()` and shared by the engine; lookups never go
//! through free-form strings.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::handler::CardEffect;
use crate::cards::CardId;

/// Handlers by card id, plus fixed chain priorities.
#[derive(Clone, Default)]
pub struct EffectRegistry {
    handlers: FxHashMap<CardId, Rc<dyn CardEffect>>,
    /// `(senior, junior)` pairs.
    priorities: Vec<(CardId, CardId)>,
}

impl EffectRegistry {
    /// Create an empty registry (no card has an effect).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> EffectRegistryBuilder {
        EffectRegistryBuilder::default()
    }

    /// Handler for a card.
    #[must_use]
    pub fn get(&self, card: CardId) -> Option<Rc<dyn CardEffect>> {
        self.handlers.get(&card).cloned()
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.handlers.contains_key(&card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Fixed chain priorities as `(senior, junior)` pairs.
    #[must_use]
    pub fn priorities(&self) -> &[(CardId, CardId)] {
        &self.priorities
    }
}

impl fmt::Debug for EffectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cards: Vec<_> = self.handlers.keys().copied().collect();
        cards.sort();
        f.debug_struct("EffectRegistry")
            .field("cards", &cards)
            .field("priorities", &self.priorities)
            .finish()
    }
}

/// Builder for `EffectRegistry`.
#[derive(Default)]
pub struct EffectRegistryBuilder {
    registry: EffectRegistry,
}

impl EffectRegistryBuilder {
    /// Register a handler.
    ///
    /// # Panics
    ///
    /// Panics if the card already has a handler.
    #[must_use]
    pub fn register(mut self, card: CardId, handler: impl CardEffect + 'static) -> Self {
        let previous = self.registry.handlers.insert(card, Rc::new(handler));
        assert!(previous.is_none(), "Duplicate effect for {card}");
        self
    }

    /// While `senior` is waiting in the pending chain, `junior` is held
    /// back from the ordering prompt.
    #[must_use]
    pub fn with_chain_priority(mut self, senior: CardId, junior: CardId) -> Self {
        self.registry.priorities.push((senior, junior));
        self
    }

    #[must_use]
    pub fn build(self) -> EffectRegistry {
        self.registry
    }
}
