//! Handler dispatch.
//!
//! After a move commits, the move engine hands every involved card to
//! `dispatch`. Each card with a registered handler is checked against the
//! handler's trigger filter, its usage slot and its precondition. While an
//! operation is batching, survivors become pending-chain entries; the
//! player orders them once the operation completes.

use std::rc::Rc;

use tracing::debug;

use super::handler::{CardEffect, TriggerContext};
use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::core::state::UsageKey;
use crate::engine::Engine;
use crate::interaction::ChainEntry;

impl Engine {
    /// Offer the handlers of the given cards.
    pub(crate) fn dispatch(&mut self, triggers: Vec<TriggerContext>) {
        let effects = Rc::clone(&self.effects);
        for trigger in triggers {
            let Some(handler) = effects.get(trigger.card) else {
                continue;
            };
            if !self.offers(handler.as_ref(), &trigger) {
                continue;
            }

            if self.interaction.is_batching() {
                let label = self.view().name(trigger.source);
                self.interaction.push_chain(ChainEntry::new(
                    label,
                    trigger.source,
                    trigger.card,
                    move |engine| engine.run_handler(handler.as_ref(), trigger),
                ));
            } else if let Err(err) = self.in_effect(|engine| handler.activate(engine, trigger)) {
                self.reject(err);
            }
        }
    }

    /// Activate a card's effect by hand.
    pub fn activate(&mut self, id: InstanceId) -> Result<(), DuelError> {
        self.run_batched(|engine| {
            let card = engine
                .state
                .instance(id)
                .ok_or(DuelError::UnknownInstance(id))?
                .card_id;
            let name = engine.view().name(id);
            let handler = engine
                .effects
                .get(card)
                .ok_or_else(|| DuelError::MissingPrecondition(format!("{name} has no effect to activate")))?;

            let trigger = TriggerContext::manual(id, card, engine.state.zones.locate(id));
            if !handler.triggers_on(&trigger) {
                return Err(DuelError::MissingPrecondition(format!(
                    "{name} cannot be activated from here"
                )));
            }
            if let Some(slot) = handler.usage_slot() {
                if engine.state.usage_count(UsageKey::new(card, slot)) > 0 {
                    return Err(DuelError::UsageExhausted(name));
                }
            }
            if !handler.precondition(&engine.view(), &trigger) {
                return Err(DuelError::MissingPrecondition(format!(
                    "the conditions for {name} are not met"
                )));
            }

            debug!(instance = %id, %card, "manual activation");
            engine.in_effect(|engine| handler.activate(engine, trigger))
        })
    }

    /// Run a handler that was queued earlier. Conditions are re-checked
    /// against the live state and a handler that no longer applies
    /// declines silently.
    pub(crate) fn run_handler(&mut self, handler: &dyn CardEffect, trigger: TriggerContext) -> Result<(), DuelError> {
        if !self.offers(handler, &trigger) {
            return Ok(());
        }
        handler.activate(self, trigger)
    }

    fn offers(&self, handler: &dyn CardEffect, trigger: &TriggerContext) -> bool {
        if !handler.triggers_on(trigger) {
            return false;
        }
        if let Some(slot) = handler.usage_slot() {
            if self.state.usage_count(trigger.usage_key(slot)) > 0 {
                debug!(instance = %trigger.source, slot, "usage exhausted");
                return false;
            }
        }
        if self.state.instance(trigger.source).is_none() {
            return false;
        }
        let ok = handler.precondition(&self.view(), trigger);
        if !ok {
            debug!(instance = %trigger.source, "precondition not met");
        }
        ok
    }
}
