//! Xyz Summon.

use tracing::debug;

use super::extra::extra_deck_target;
use super::materials;
use crate::cards::{CardFilter, Subtype};
use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::engine::Engine;
use crate::interaction::{PickCount, RequestId, Selector};
use crate::rules::SummonVariant;

impl Engine {
    /// Xyz Summon `target` from the Extra Deck.
    ///
    /// Two or more field monsters whose level equals the rank become its
    /// attached materials.
    pub fn xyz_summon(&mut self, target: InstanceId) -> Result<RequestId, DuelError> {
        self.run_batched(|engine| {
            let view = engine.view();
            let def = extra_deck_target(&view, target, Subtype::Xyz)?;
            let rank = def
                .rank
                .ok_or_else(|| DuelError::MissingPrecondition(format!("{} has no rank", def.name)))?;
            let pool = materials::xyz_candidates(&view, rank);
            if pool.len() < 2 {
                return Err(DuelError::MissingPrecondition(format!(
                    "need at least 2 Level {rank} monsters on the field"
                )));
            }
            let title = format!("Select Xyz Materials for {}", def.name);
            debug!(instance = %target, rank, pool = pool.len(), "xyz summon");

            let count = PickCount::range(2, pool.len());
            let selector = Selector::field_monsters(CardFilter::Instances(pool)).with_count(count);
            engine.target(Some(target), title, selector, move |engine, picks| {
                engine.prompt_extra_zone(target, picks, SummonVariant::Xyz)
            })
        })
    }
}
