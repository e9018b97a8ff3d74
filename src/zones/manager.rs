//! Zone store: canonical card locations.
//!
//! The `ZoneStore` owns every container on the board plus the material
//! attachment map. It is deliberately dumb: it inserts and removes ids and
//! answers "where is X", but knows nothing about card types. Placement
//! rules live in `rules::placement`.
//!
//! All containers are `im` persistent structures, so cloning the store for
//! a snapshot shares structure with the live copy.
//!
//! ## Invariant
//!
//! An instance id appears in exactly one container, or in exactly one
//! host's material list, never both and never twice.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::location::{Location, Slot, ZoneKind};
use crate::core::entity::InstanceId;

/// Position for inserting a card into a list zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Front of the list (top of the deck).
    Top,
    /// End of the list.
    Bottom,
    /// Insert at specific index (clamped to the list length).
    Index(usize),
}

/// Every container on the board.
///
/// ## Usage
///
/// ```
/// use solo_duel::zones::{ZoneStore, ZoneKind, ZonePosition, Location};
/// use solo_duel::core::InstanceId;
///
/// let mut store = ZoneStore::new();
/// store.push(ZoneKind::Deck, InstanceId(1), ZonePosition::Bottom);
/// store.push(ZoneKind::Deck, InstanceId(2), ZonePosition::Top);
///
/// assert_eq!(store.list(ZoneKind::Deck).unwrap()[0], InstanceId(2));
/// assert_eq!(store.locate(InstanceId(1)), Some(Location::zone(ZoneKind::Deck, 1)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStore {
    pub deck: Vector<InstanceId>,
    pub hand: Vector<InstanceId>,
    pub graveyard: Vector<InstanceId>,
    pub banished: Vector<InstanceId>,
    pub extra_deck: Vector<InstanceId>,
    pub monster_zones: [Option<InstanceId>; 5],
    pub spell_trap_zones: [Option<InstanceId>; 5],
    pub field_zone: [Option<InstanceId>; 1],
    pub extra_monster_zones: [Option<InstanceId>; 2],

    /// Host -> ordered materials.
    pub materials: OrdMap<InstanceId, Vector<InstanceId>>,
}

impl ZoneStore {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === List zones ===

    /// Get a list zone. `None` for slot zones.
    #[must_use]
    pub fn list(&self, zone: ZoneKind) -> Option<&Vector<InstanceId>> {
        match zone {
            ZoneKind::Deck => Some(&self.deck),
            ZoneKind::Hand => Some(&self.hand),
            ZoneKind::Graveyard => Some(&self.graveyard),
            ZoneKind::Banished => Some(&self.banished),
            ZoneKind::ExtraDeck => Some(&self.extra_deck),
            _ => None,
        }
    }

    fn list_mut(&mut self, zone: ZoneKind) -> Option<&mut Vector<InstanceId>> {
        match zone {
            ZoneKind::Deck => Some(&mut self.deck),
            ZoneKind::Hand => Some(&mut self.hand),
            ZoneKind::Graveyard => Some(&mut self.graveyard),
            ZoneKind::Banished => Some(&mut self.banished),
            ZoneKind::ExtraDeck => Some(&mut self.extra_deck),
            _ => None,
        }
    }

    /// Insert into a list zone. Ignored for slot zones.
    pub fn push(&mut self, zone: ZoneKind, id: InstanceId, position: ZonePosition) {
        if let Some(list) = self.list_mut(zone) {
            match position {
                ZonePosition::Top => list.push_front(id),
                ZonePosition::Bottom => list.push_back(id),
                ZonePosition::Index(i) => {
                    let idx = i.min(list.len());
                    list.insert(idx, id);
                }
            }
        }
    }

    /// Remove and return the top (front) of the deck.
    pub fn pop_deck_top(&mut self) -> Option<InstanceId> {
        self.deck.pop_front()
    }

    /// Replace the deck order.
    pub fn set_deck(&mut self, order: impl IntoIterator<Item = InstanceId>) {
        self.deck = order.into_iter().collect();
    }

    // === Slot zones ===

    /// Get the slots of a slot zone. `None` for list zones.
    #[must_use]
    pub fn slots(&self, zone: ZoneKind) -> Option<&[Option<InstanceId>]> {
        match zone {
            ZoneKind::MonsterZone => Some(self.monster_zones.as_slice()),
            ZoneKind::SpellTrapZone => Some(self.spell_trap_zones.as_slice()),
            ZoneKind::FieldZone => Some(self.field_zone.as_slice()),
            ZoneKind::ExtraMonsterZone => Some(self.extra_monster_zones.as_slice()),
            _ => None,
        }
    }

    fn slots_mut(&mut self, zone: ZoneKind) -> Option<&mut [Option<InstanceId>]> {
        match zone {
            ZoneKind::MonsterZone => Some(self.monster_zones.as_mut_slice()),
            ZoneKind::SpellTrapZone => Some(self.spell_trap_zones.as_mut_slice()),
            ZoneKind::FieldZone => Some(self.field_zone.as_mut_slice()),
            ZoneKind::ExtraMonsterZone => Some(self.extra_monster_zones.as_mut_slice()),
            _ => None,
        }
    }

    /// Occupant of a slot (`None` if empty or out of range).
    #[must_use]
    pub fn at(&self, slot: Slot) -> Option<InstanceId> {
        self.slots(slot.zone)?.get(slot.index).copied().flatten()
    }

    /// True if the slot exists and is empty.
    #[must_use]
    pub fn is_free(&self, slot: Slot) -> bool {
        slot.is_valid() && self.at(slot).is_none()
    }

    /// Put an instance into a slot, returning the previous occupant.
    pub fn set_slot(&mut self, slot: Slot, id: Option<InstanceId>) -> Option<InstanceId> {
        let slots = self.slots_mut(slot.zone)?;
        let cell = slots.get_mut(slot.index)?;
        std::mem::replace(cell, id)
    }

    /// Free slots of a zone, in index order.
    #[must_use]
    pub fn free_slots(&self, zone: ZoneKind) -> Vec<Slot> {
        self.slots(zone)
            .map(|slots| {
                slots
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.is_none())
                    .map(|(i, _)| Slot::new(zone, i))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Occupied slots of a zone with their occupants.
    pub fn occupied(&self, zone: ZoneKind) -> impl Iterator<Item = (Slot, InstanceId)> + '_ {
        self.slots(zone)
            .unwrap_or(&[])
            .iter()
            .enumerate()
            .filter_map(move |(i, s)| s.map(|id| (Slot::new(zone, i), id)))
    }

    /// Monsters on the field: main monster zones, then extra monster zones.
    pub fn field_monsters(&self) -> impl Iterator<Item = (Slot, InstanceId)> + '_ {
        self.occupied(ZoneKind::MonsterZone)
            .chain(self.occupied(ZoneKind::ExtraMonsterZone))
    }

    // === Materials ===

    /// Materials attached to a host.
    #[must_use]
    pub fn materials_of(&self, host: InstanceId) -> Vec<InstanceId> {
        self.materials
            .get(&host)
            .map(|m| m.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Attach a material to a host (appended).
    pub fn attach(&mut self, host: InstanceId, material: InstanceId) {
        let mut list = self.materials.get(&host).cloned().unwrap_or_default();
        list.push_back(material);
        self.materials.insert(host, list);
    }

    /// Remove the host's entry and every nested entry below it.
    ///
    /// Returns all detached materials, depth first in attachment order.
    pub fn detach_all(&mut self, host: InstanceId) -> Vec<InstanceId> {
        let mut out = Vec::new();
        if let Some(list) = self.materials.remove(&host) {
            for material in list {
                out.push(material);
                out.extend(self.detach_all(material));
            }
        }
        out
    }

    // === Lookup ===

    /// Find an instance anywhere on the board.
    #[must_use]
    pub fn locate(&self, id: InstanceId) -> Option<Location> {
        for zone in ZoneKind::ALL {
            if let Some(list) = self.list(zone) {
                if let Some(index) = list.index_of(&id) {
                    return Some(Location::zone(zone, index));
                }
            } else if let Some(slots) = self.slots(zone) {
                if let Some(index) = slots.iter().position(|s| *s == Some(id)) {
                    return Some(Location::zone(zone, index));
                }
            }
        }
        self.materials.iter().find_map(|(host, list)| {
            list.index_of(&id)
                .map(|index| Location::Material { host: *host, index })
        })
    }

    /// Check whether `location` currently holds `id`.
    #[must_use]
    pub fn holds(&self, location: Location, id: InstanceId) -> bool {
        match location {
            Location::Zone { zone, index } => match self.list(zone) {
                Some(list) => list.get(index) == Some(&id),
                None => self.at(Slot::new(zone, index)) == Some(id),
            },
            Location::Material { host, index } => self
                .materials
                .get(&host)
                .and_then(|m| m.get(index))
                == Some(&id),
        }
    }

    /// Remove `id` from `location`. Returns false if it was not there.
    pub fn take(&mut self, location: Location, id: InstanceId) -> bool {
        if !self.holds(location, id) {
            return false;
        }
        match location {
            Location::Zone { zone, index } => {
                if let Some(list) = self.list_mut(zone) {
                    list.remove(index);
                } else {
                    self.set_slot(Slot::new(zone, index), None);
                }
            }
            Location::Material { host, index } => {
                if let Some(list) = self.materials.get_mut(&host) {
                    list.remove(index);
                    if list.is_empty() {
                        self.materials.remove(&host);
                    }
                }
            }
        }
        true
    }

    /// Every instance id held anywhere, with repeats if the invariant is
    /// broken.
    #[must_use]
    pub fn all_ids(&self) -> Vec<InstanceId> {
        let mut out = Vec::new();
        for zone in ZoneKind::ALL {
            if let Some(list) = self.list(zone) {
                out.extend(list.iter().copied());
            } else if let Some(slots) = self.slots(zone) {
                out.extend(slots.iter().flatten().copied());
            }
        }
        for list in self.materials.values() {
            out.extend(list.iter().copied());
        }
        out
    }

    /// Number of places holding `id` (1 when the invariant holds).
    #[must_use]
    pub fn occurrences(&self, id: InstanceId) -> usize {
        self.all_ids().into_iter().filter(|x| *x == id).count()
    }

    /// Total cards tracked, materials included.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.all_ids().len()
    }
}
