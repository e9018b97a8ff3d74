//! Shared steps of Extra Deck summons.
//!
//! Every Extra Deck summon ends the same way: once the materials are
//! chosen the player picks a zone, and only then is anything committed.
//! The commit is one undo unit with one log line.

use tracing::info;

use crate::cards::{CardDefinition, Subtype};
use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::core::state::DuelView;
use crate::engine::Engine;
use crate::rules::{messages, placement, MoveRequest, OperationContext, SummonVariant};
use crate::zones::{Slot, ZoneKind};

/// The Extra Deck monster to summon, checked for location and subtype.
pub(crate) fn extra_deck_target<'a>(
    view: &DuelView<'a>,
    target: InstanceId,
    subtype: Subtype,
) -> Result<&'a CardDefinition, DuelError> {
    let def = view.definition(target).ok_or(DuelError::UnknownInstance(target))?;
    if view.location(target).and_then(|l| l.zone_kind()) != Some(ZoneKind::ExtraDeck) {
        return Err(DuelError::MissingPrecondition(format!("{} is not in the Extra Deck", def.name)));
    }
    if !def.has_subtype(subtype) {
        return Err(DuelError::MissingPrecondition(format!("{} is not a {subtype:?} Monster", def.name)));
    }
    Ok(def)
}

impl Engine {
    /// Ask where to put the summoned monster.
    pub(crate) fn prompt_extra_zone(
        &mut self,
        target: InstanceId,
        materials: Vec<InstanceId>,
        variant: SummonVariant,
    ) -> Result<(), DuelError> {
        let view = self.view();
        let slots = placement::extra_summon_slots(&view, target, &materials, variant);
        let title = format!("Choose a zone for {}", view.name(target));
        self.choose_zone(Some(target), title, slots, move |engine, slot| {
            engine.commit_extra_summon(target, &materials, slot, variant)
        })?;
        Ok(())
    }

    /// Send the materials away and place the monster.
    pub(crate) fn commit_extra_summon(
        &mut self,
        target: InstanceId,
        materials: &[InstanceId],
        slot: Slot,
        variant: SummonVariant,
    ) -> Result<(), DuelError> {
        let view = self.view();
        let from = view.location(target).ok_or(DuelError::StaleReference(target))?;
        if from.zone_kind() != Some(ZoneKind::ExtraDeck) {
            return Err(DuelError::StaleReference(target));
        }
        for material in materials {
            if view.location(*material).is_none() {
                return Err(DuelError::StaleReference(*material));
            }
        }
        let board = placement::board_without(&view.state.zones, materials);
        placement::check_slot(&view, &board, target, from, slot)?;
        let name = view.name(target);
        let names: Vec<String> = materials.iter().map(|m| view.name(*m)).collect();

        self.checkpoint(&OperationContext::default());
        let unit = OperationContext::default().within_unit();

        for material in materials {
            match variant {
                SummonVariant::Xyz => {
                    self.attach_material(target, *material)?;
                }
                SummonVariant::Fusion => {
                    let in_graveyard = self
                        .state
                        .zones
                        .locate(*material)
                        .and_then(|l| l.zone_kind())
                        == Some(ZoneKind::Graveyard);
                    let to = if in_graveyard { ZoneKind::Banished } else { ZoneKind::Graveyard };
                    self.move_with(MoveRequest::new(*material, to), unit.quiet().as_material())?;
                }
                SummonVariant::Synchro | SummonVariant::Link | SummonVariant::Pendulum => {
                    self.move_with(MoveRequest::new(*material, ZoneKind::Graveyard), unit.quiet().as_material())?;
                }
            }
        }

        self.move_with(MoveRequest::to_slot(target, slot).summoned(variant), unit.quiet())?;
        self.log(messages::summon_line(variant, &name, slot, &names));
        info!(instance = %target, %variant, materials = materials.len(), "extra deck summon");
        Ok(())
    }
}
