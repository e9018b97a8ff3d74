//! Synchro Summon.

use tracing::debug;

use super::extra::extra_deck_target;
use super::materials;
use crate::cards::{CardFilter, Subtype};
use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::engine::Engine;
use crate::interaction::{GroupRule, PickCount, RequestId, Selector};
use crate::rules::SummonVariant;

impl Engine {
    /// Synchro Summon `target` from the Extra Deck.
    ///
    /// Opens a Targeting request for one Tuner and one non-Tuner whose
    /// levels add up to the target's level, then a zone request.
    pub fn synchro_summon(&mut self, target: InstanceId) -> Result<RequestId, DuelError> {
        self.run_batched(|engine| {
            let view = engine.view();
            let def = extra_deck_target(&view, target, Subtype::Synchro)?;
            let level = def
                .level
                .ok_or_else(|| DuelError::MissingPrecondition(format!("{} has no level", def.name)))?;
            let pool = materials::synchro_candidates(&view);
            if !materials::synchro_feasible(&view, &pool, level) {
                return Err(DuelError::MissingPrecondition(format!(
                    "no Tuner and non-Tuner on the field add up to Level {level}"
                )));
            }
            let title = format!("Select Synchro Materials for {}", def.name);
            debug!(instance = %target, level, pool = pool.len(), "synchro summon");

            let selector = Selector::field_monsters(CardFilter::Instances(pool))
                .with_count(PickCount::exactly(2))
                .with_rule(GroupRule::SynchroLevel(level));
            engine.target(Some(target), title, selector, move |engine, picks| {
                engine.prompt_extra_zone(target, picks, SummonVariant::Synchro)
            })
        })
    }
}
