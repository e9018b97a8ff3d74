//! Link-arrow geometry.
//!
//! The monster area is a small grid. The two extra monster zones sit in
//! the row above the five main monster zones, over columns 1 and 3:
//!
//! ```text
//! row 0:        [EMZ 0]        [EMZ 1]
//! row 1: [MZ 0] [MZ 1] [MZ 2] [MZ 3] [MZ 4]
//! ```
//!
//! An arrow points at the grid cell next to the card in its direction.
//! Cells outside the grid (the opponent's side, the spell/trap row, the
//! gaps beside the extra monster zones) are not zones.

use super::location::{Slot, ZoneKind};
use crate::cards::LinkMarker;

fn cell(slot: Slot) -> Option<(i32, i32)> {
    match slot.zone {
        ZoneKind::MonsterZone if slot.index < 5 => Some((1, slot.index as i32)),
        ZoneKind::ExtraMonsterZone if slot.index < 2 => Some((0, 1 + 2 * slot.index as i32)),
        _ => None,
    }
}

fn slot_at(row: i32, col: i32) -> Option<Slot> {
    match (row, col) {
        (1, 0..=4) => Some(Slot::monster(col as usize)),
        (0, 1) => Some(Slot::extra_monster(0)),
        (0, 3) => Some(Slot::extra_monster(1)),
        _ => None,
    }
}

fn offset(marker: LinkMarker) -> (i32, i32) {
    match marker {
        LinkMarker::TopLeft => (-1, -1),
        LinkMarker::Top => (-1, 0),
        LinkMarker::TopRight => (-1, 1),
        LinkMarker::Left => (0, -1),
        LinkMarker::Right => (0, 1),
        LinkMarker::BottomLeft => (1, -1),
        LinkMarker::Bottom => (1, 0),
        LinkMarker::BottomRight => (1, 1),
    }
}

/// Slots a card at `from` points to with the given arrows.
///
/// ```
/// use solo_duel::cards::LinkMarker;
/// use solo_duel::zones::{linked_slots, Slot};
///
/// let pointed = linked_slots(Slot::extra_monster(0), &[LinkMarker::Bottom, LinkMarker::BottomRight]);
/// assert_eq!(pointed, vec![Slot::monster(1), Slot::monster(2)]);
/// ```
#[must_use]
pub fn linked_slots(from: Slot, markers: &[LinkMarker]) -> Vec<Slot> {
    let Some((row, col)) = cell(from) else {
        return Vec::new();
    };
    markers
        .iter()
        .filter_map(|m| {
            let (dr, dc) = offset(*m);
            slot_at(row + dr, col + dc)
        })
        .collect()
}
