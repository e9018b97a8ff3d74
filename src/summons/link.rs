//! Link Summon.

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
    /// Link Summon `target` from the Extra Deck.
    ///
    /// The materials must count as exactly the Link rating. A Link monster
    /// may count as its rating and a card marked `double_link_material` as
    /// two. The monster goes to a zone a Link monster points to, or to an
    /// extra monster zone when there is none.
    pub fn link_summon(&mut self, target: InstanceId) -> Result<RequestId, DuelError> {
        self.run_batched(|engine| {
            let view = engine.view();
            let def = extra_deck_target(&view, target, Subtype::Link)?;
            let rating = def.link_rating().filter(|r| *r > 0).ok_or_else(|| {
                DuelError::MissingPrecondition(format!("{} has no link arrows", def.name))
            })?;
            let pool = materials::field_monsters(&view);
            if !materials::link_feasible(&view, &pool, rating) {
                return Err(DuelError::MissingPrecondition(format!(
                    "the monsters on the field cannot make Link-{rating}"
                )));
            }
            let title = format!("Select Link Materials for {}", def.name);
            debug!(instance = %target, rating, pool = pool.len(), "link summon");

            let count = PickCount::range(1, rating as usize);
            let selector = Selector::field_monsters(CardFilter::Instances(pool))
                .with_count(count)
                .with_rule(GroupRule::LinkRating(rating));
            engine.target(Some(target), title, selector, move |engine, picks| {
                engine.prompt_extra_zone(target, picks, SummonVariant::Link)
            })
        })
    }
}
