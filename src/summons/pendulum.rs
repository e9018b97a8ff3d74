//! Pendulum Summon.
//!
//! With Pendulum monsters in both outer spell/trap zones, the player may
//! summon any number of monsters whose level is strictly between the two
//! scales, from the hand and face-up from the Extra Deck. Zones are asked
//! one monster at a time, Extra Deck monsters first, and nothing moves
//! until every monster has a zone.

use tracing::{debug, info};

use crate::cards::CardFilter;
use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::core::state::DuelView;
use crate::engine::Engine;
use crate::interaction::{PickCount, RequestId, Selector};
use crate::rules::{placement, MoveRequest, OperationContext, SummonVariant};
use crate::zones::{Slot, ZoneKind};

/// The two scales, lowest first, if both outer spell/trap zones hold a
/// Pendulum monster.
#[must_use]
pub fn pendulum_scales(view: &DuelView<'_>) -> Option<(i64, i64)> {
    let zones = &view.state.zones;
    let left = zones.at(Slot::spell_trap(0))?;
    let right = zones.at(Slot::spell_trap(4))?;
    let a = view.is_pendulum(left).then(|| view.scale(left)).flatten()?;
    let b = view.is_pendulum(right).then(|| view.scale(right)).flatten()?;
    Some((a.min(b), a.max(b)))
}

/// Monsters that may be Pendulum Summoned between the given scales.
#[must_use]
pub fn pendulum_candidates(view: &DuelView<'_>, low: i64, high: i64) -> Vec<InstanceId> {
    let between = CardFilter::Monster.and(CardFilter::LevelBetween(low, high));
    let zones = &view.state.zones;
    let from_hand = zones.hand.iter().copied().filter(|id| between.matches(view, *id));
    let from_extra = zones.extra_deck.iter().copied().filter(|id| {
        view.is_pendulum(*id)
            && view.state.instance(*id).is_some_and(|i| i.face_up)
            && between.matches(view, *id)
    });
    from_hand.chain(from_extra).collect()
}

impl Engine {
    /// Start a Pendulum Summon.
    pub fn pendulum_summon(&mut self) -> Result<RequestId, DuelError> {
        self.run_batched(|engine| {
            let view = engine.view();
            let (low, high) = pendulum_scales(&view).ok_or_else(|| {
                DuelError::MissingPrecondition("Pendulum Scales must be set in both outer zones".to_string())
            })?;
            let pool = pendulum_candidates(&view, low, high);
            if pool.is_empty() {
                return Err(DuelError::MissingPrecondition(format!(
                    "no monster can be Pendulum Summoned between Scales {low} and {high}"
                )));
            }
            debug!(low, high, pool = pool.len(), "pendulum summon");

            let count = PickCount::range(1, pool.len());
            let selector = Selector::new(&[ZoneKind::Hand, ZoneKind::ExtraDeck], CardFilter::Instances(pool))
                .with_count(count);
            engine.target(None, "Select monsters to Pendulum Summon", selector, |engine, picks| {
                let view = engine.view();
                let from_extra = |id: &InstanceId| {
                    view.location(*id).and_then(|l| l.zone_kind()) == Some(ZoneKind::ExtraDeck)
                };
                let (mut order, from_hand): (Vec<_>, Vec<_>) = picks.into_iter().partition(from_extra);
                order.extend(from_hand);
                engine.pendulum_next(order, Vec::new())
            })
        })
    }

    /// Ask a zone for the next monster, or commit once all have one.
    fn pendulum_next(
        &mut self,
        order: Vec<InstanceId>,
        placed: Vec<(InstanceId, Slot)>,
    ) -> Result<(), DuelError> {
        let Some(next) = order.get(placed.len()).copied() else {
            return self.commit_pendulum(&placed);
        };
        let view = self.view();
        let slots = placement::pendulum_slots(&view, next, &placed);
        let title = format!("Choose a zone for {}", view.name(next));
        self.choose_zone(Some(next), title, slots, move |engine, slot| {
            let mut placed = placed;
            placed.push((next, slot));
            engine.pendulum_next(order, placed)
        })?;
        Ok(())
    }

    fn commit_pendulum(&mut self, placed: &[(InstanceId, Slot)]) -> Result<(), DuelError> {
        let view = self.view();
        let mut lines = Vec::with_capacity(placed.len());
        for (id, slot) in placed {
            let from = view.location(*id).and_then(|l| l.zone_kind());
            if !matches!(from, Some(ZoneKind::Hand | ZoneKind::ExtraDeck)) {
                return Err(DuelError::StaleReference(*id));
            }
            if !view.state.zones.is_free(*slot) {
                return Err(DuelError::IllegalPlacement(format!("{slot} is occupied")));
            }
            lines.push(format!("{} to {slot}", view.name(*id)));
        }

        self.checkpoint(&OperationContext::default());
        let unit = OperationContext::default().within_unit().quiet();
        for (id, slot) in placed {
            self.move_with(MoveRequest::to_slot(*id, *slot).summoned(SummonVariant::Pendulum), unit)?;
        }
        self.state.pendulum_summon_count += 1;
        self.log(format!("Pendulum Summoned {}", lines.join(", ")));
        info!(monsters = placed.len(), count = self.state.pendulum_summon_count, "pendulum summon");
        Ok(())
    }
}
