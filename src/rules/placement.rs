//! Placement rules.
//!
//! Pure checks over a board and the card definitions. The move engine
//! calls them against the live board; summon flows call them against a
//! scratch copy of the board with the materials already removed or with
//! reserved zones already filled, so "will this slot be free once the
//! summon commits" is answered by the same rules.

use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::core::state::DuelView;
use crate::zones::{linked_slots, Location, Slot, ZoneKind, ZoneStore};

use super::context::SummonVariant;

/// Destination after redirects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redirect {
    pub zone: ZoneKind,
    /// The requested zone was replaced.
    pub redirected: bool,
}

/// Apply leave-the-field and Extra Deck redirects.
///
/// In priority order:
/// 1. A card flagged `banish_on_leave` leaving the field is banished.
/// 2. A Pendulum monster leaving the field for the Graveyard goes to the
///    Extra Deck, unless it is a material being detached.
/// 3. A Fusion/Synchro/Xyz/Link monster sent to the hand or Deck goes to
///    the Extra Deck.
#[must_use]
pub fn redirect(
    view: &DuelView<'_>,
    id: InstanceId,
    from: Location,
    to: ZoneKind,
    material_move: bool,
) -> Redirect {
    let leaving = from.is_field() && !to.is_field();
    let banish = view
        .state
        .instance(id)
        .is_some_and(|i| i.flags.banish_on_leave);

    let zone = if leaving && banish {
        ZoneKind::Banished
    } else if leaving && to == ZoneKind::Graveyard && view.is_pendulum(id) && !material_move {
        ZoneKind::ExtraDeck
    } else if matches!(to, ZoneKind::Hand | ZoneKind::Deck) && view.is_extra_deck(id) {
        ZoneKind::ExtraDeck
    } else {
        to
    };
    Redirect {
        zone,
        redirected: zone != to,
    }
}

/// Check that `id`, currently at `from`, may be put into `slot` on `board`.
pub fn check_slot(
    view: &DuelView<'_>,
    board: &ZoneStore,
    id: InstanceId,
    from: Location,
    slot: Slot,
) -> Result<(), DuelError> {
    let name = view.name(id);
    if !slot.is_valid() {
        return Err(DuelError::IllegalPlacement(format!(
            "{} has no slot {}",
            slot.zone,
            slot.index + 1
        )));
    }

    match slot.zone {
        ZoneKind::SpellTrapZone => {
            if view.is_monster(id) && !view.is_pendulum(id) {
                return Err(DuelError::IllegalPlacement(format!(
                    "{name} is a monster and cannot be placed in a Spell/Trap Zone"
                )));
            }
            if view.is_pendulum(id) && slot.index != 0 && slot.index != 4 {
                return Err(DuelError::IllegalPlacement(format!(
                    "{name} can only be placed in Spell/Trap Zone 1 or 5"
                )));
            }
        }
        ZoneKind::FieldZone => {
            if view.is_monster(id) {
                return Err(DuelError::IllegalPlacement(format!(
                    "{name} is a monster and cannot be placed in the Field Zone"
                )));
            }
        }
        ZoneKind::MonsterZone | ZoneKind::ExtraMonsterZone => {
            if !view.is_monster(id) {
                return Err(DuelError::IllegalPlacement(format!("{name} is not a monster")));
            }
        }
        _ => {}
    }

    if board.at(slot).is_some() {
        return Err(DuelError::IllegalPlacement(format!("{slot} is occupied")));
    }

    if slot.zone == ZoneKind::ExtraMonsterZone {
        let other = Slot::extra_monster(1 - slot.index);
        if board.at(other).is_some() && from.slot() != Some(other) {
            return Err(DuelError::IllegalPlacement(
                "only one Extra Monster Zone can be used".to_string(),
            ));
        }
    }
    Ok(())
}

/// First slot of `zone` that passes `check_slot`.
///
/// If none does, returns the error reported for the first slot.
pub fn first_legal_slot(
    view: &DuelView<'_>,
    board: &ZoneStore,
    id: InstanceId,
    from: Location,
    zone: ZoneKind,
) -> Result<Slot, DuelError> {
    let count = zone.slot_count().unwrap_or(0);
    let mut first_error = None;
    for index in 0..count {
        let slot = Slot::new(zone, index);
        match check_slot(view, board, id, from, slot) {
            Ok(()) => return Ok(slot),
            Err(err) => {
                first_error.get_or_insert(err);
            }
        }
    }
    Err(first_error.unwrap_or_else(|| DuelError::IllegalPlacement(format!("{zone} has no slots"))))
}

/// Tributes a Normal Summon needs for a monster of this level.
#[must_use]
pub fn tributes_required(level: Option<i64>) -> usize {
    match level {
        Some(l) if l >= 7 => 2,
        Some(l) if l >= 5 => 1,
        _ => 0,
    }
}

/// Copy of the board with the given instances taken out.
#[must_use]
pub fn board_without(board: &ZoneStore, ids: &[InstanceId]) -> ZoneStore {
    let mut scratch = board.clone();
    for id in ids {
        if let Some(location) = scratch.locate(*id) {
            scratch.take(location, *id);
        }
    }
    scratch
}

/// Main monster zones pointed to by Link monsters on `board`, plus the
/// extra monster zones they point to.
///
/// Returns `None` when no Link monster is on the board.
#[must_use]
pub fn linked_zones(view: &DuelView<'_>, board: &ZoneStore) -> Option<Vec<Slot>> {
    let mut found = false;
    let mut slots = Vec::new();
    for (slot, id) in board.field_monsters() {
        let Some(def) = view.definition(id) else {
            continue;
        };
        if def.link_rating().is_none() {
            continue;
        }
        found = true;
        for pointed in linked_slots(slot, &def.link_markers) {
            if !slots.contains(&pointed) {
                slots.push(pointed);
            }
        }
    }
    found.then(|| {
        slots.sort();
        slots
    })
}

/// Slots an Extra Deck monster may be summoned to, once `materials` have
/// left the board.
///
/// Fusion, Synchro and Xyz monsters may use any main monster zone or an
/// extra monster zone. Link monsters may only use zones pointed to by Link
/// monsters already on the board, or the extra monster zones when there
/// are none.
#[must_use]
pub fn extra_summon_slots(
    view: &DuelView<'_>,
    target: InstanceId,
    materials: &[InstanceId],
    variant: SummonVariant,
) -> Vec<Slot> {
    let board = board_without(&view.state.zones, materials);
    let Some(from) = view.location(target) else {
        return Vec::new();
    };

    let options: Vec<Slot> = if variant == SummonVariant::Link {
        linked_zones(view, &board).unwrap_or_else(|| vec![Slot::extra_monster(0), Slot::extra_monster(1)])
    } else {
        (0..5)
            .map(Slot::monster)
            .chain((0..2).map(Slot::extra_monster))
            .collect()
    };

    options
        .into_iter()
        .filter(|slot| check_slot(view, &board, target, from, *slot).is_ok())
        .collect()
}

/// Slots a monster may be Pendulum Summoned to, given zones already
/// reserved by earlier picks of the same summon.
///
/// Monsters from the hand may use any free main monster zone. Monsters
/// from the Extra Deck may use an extra monster zone or a main monster
/// zone pointed to by a Link monster.
#[must_use]
pub fn pendulum_slots(view: &DuelView<'_>, id: InstanceId, reserved: &[(InstanceId, Slot)]) -> Vec<Slot> {
    let mut board = view.state.zones.clone();
    for (held, slot) in reserved {
        board.set_slot(*slot, Some(*held));
    }
    let Some(from) = view.location(id) else {
        return Vec::new();
    };

    let options: Vec<Slot> = if from.zone_kind() == Some(ZoneKind::ExtraDeck) {
        let mut slots = vec![Slot::extra_monster(0), Slot::extra_monster(1)];
        if let Some(linked) = linked_zones(view, &board) {
            slots.extend(linked.into_iter().filter(|s| s.zone == ZoneKind::MonsterZone));
        }
        slots
    } else {
        (0..5).map(Slot::monster).collect()
    };

    options
        .into_iter()
        .filter(|slot| check_slot(view, &board, id, from, *slot).is_ok())
        .collect()
}
