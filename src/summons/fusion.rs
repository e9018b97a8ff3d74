//! Fusion Summon.
//!
//! Fusion is usually started by a spell's effect, which decides where the
//! materials may come from. The flow is:
//!
//! 1. Search the Extra Deck for a Fusion Monster whose recipe can be met
//! 2. Pick one material per recipe slot
//! 3. Pick a zone
//! 4. Commit: materials in the Graveyard are banished, the rest go to the
//!    Graveyard, and the Fusion Monster is placed

use tracing::debug;

use super::materials;
use crate::cards::{CardFilter, Subtype};
use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::core::state::DuelView;
use crate::engine::Engine;
use crate::interaction::{GroupRule, PickCount, RequestId, Selector};
use crate::rules::SummonVariant;
use crate::zones::ZoneKind;

/// Monsters in the material zones.
fn material_pool(view: &DuelView<'_>, zones: &[ZoneKind]) -> Vec<InstanceId> {
    Selector::new(zones, CardFilter::Monster).candidates(view)
}

/// Fusion Monsters in the Extra Deck whose recipe the pool can meet.
#[must_use]
pub fn fusion_targets(view: &DuelView<'_>, zones: &[ZoneKind]) -> Vec<InstanceId> {
    let pool = material_pool(view, zones);
    view.state
        .zones
        .extra_deck
        .iter()
        .copied()
        .filter(|id| {
            view.definition(*id).is_some_and(|def| {
                def.has_subtype(Subtype::Fusion)
                    && materials::recipe_feasible(view, &def.fusion_materials, &pool)
            })
        })
        .collect()
}

impl Engine {
    /// Start a Fusion Summon using materials from `material_zones`.
    pub fn fusion_summon(
        &mut self,
        source: Option<InstanceId>,
        material_zones: &[ZoneKind],
    ) -> Result<RequestId, DuelError> {
        let zones = material_zones.to_vec();
        self.run_batched(|engine| {
            let targets = fusion_targets(&engine.view(), &zones);
            if targets.is_empty() {
                return Err(DuelError::MissingPrecondition(
                    "no Fusion Monster can be summoned with the available materials".to_string(),
                ));
            }
            debug!(targets = targets.len(), "fusion summon");

            let selector = Selector::new(&[ZoneKind::ExtraDeck], CardFilter::Instances(targets));
            engine.search(source, "Select a Fusion Monster", selector, move |engine, picks| {
                let Some(target) = picks.first().copied() else {
                    return Ok(());
                };
                engine.prompt_fusion_materials(source, target, &zones)
            })
        })
    }

    fn prompt_fusion_materials(
        &mut self,
        source: Option<InstanceId>,
        target: InstanceId,
        zones: &[ZoneKind],
    ) -> Result<(), DuelError> {
        let view = self.view();
        let def = view.definition(target).ok_or(DuelError::StaleReference(target))?;
        let recipe = def.fusion_materials.clone();
        let title = format!("Select Fusion Materials for {}", def.name);
        let pool = material_pool(&view, zones);

        let selector = Selector::new(zones, CardFilter::Instances(pool))
            .with_count(PickCount::exactly(recipe.len()))
            .with_rule(GroupRule::FusionRecipe(recipe));
        self.target(source, title, selector, move |engine, picks| {
            engine.prompt_extra_zone(target, picks, SummonVariant::Fusion)
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardId, CardRegistry};
    use crate::core::state::DuelState;
    use crate::zones::ZonePosition;

    #[test]
    fn test_fusion_targets() {
        let cards = CardRegistry::from_definitions(vec![
            CardDefinition::monster(CardId::new(1), "Vale Scout", 4, 1600, 1000).with_attr("archetype", "Vale"),
            CardDefinition::monster(CardId::new(2), "Vale Chimera", 8, 2800, 2500).with_fusion_materials(vec![
                CardFilter::archetype("Vale"),
                CardFilter::Monster,
            ]),
        ]);
        let mut state = DuelState::new();
        let scout = state.alloc_instance(CardId::new(1));
        let chimera = state.alloc_instance(CardId::new(2));
        state.zones.push(ZoneKind::Hand, scout, ZonePosition::Bottom);
        state.zones.push(ZoneKind::ExtraDeck, chimera, ZonePosition::Bottom);

        let view = DuelView::new(&state, &cards);
        assert!(fusion_targets(&view, &[ZoneKind::Hand]).is_empty());

        let second = state.alloc_instance(CardId::new(1));
        state.zones.push(ZoneKind::Hand, second, ZonePosition::Bottom);
        let view = DuelView::new(&state, &cards);
        assert_eq!(fusion_targets(&view, &[ZoneKind::Hand]), vec![chimera]);
        assert!(fusion_targets(&view, &[ZoneKind::Graveyard]).is_empty());
    }
}
