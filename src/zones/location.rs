//! Zone kinds, slots and locations.
//!
//! The board is fixed: five list zones (deck, hand, graveyard, banished,
//! extra deck) and four kinds of single-card slots (5 monster, 5
//! spell/trap, 1 field, 2 extra monster). A card can also sit outside every
//! zone as a material attached to a host.

use serde::{Deserialize, Serialize};

use crate::core::entity::InstanceId;

/// A named container on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Deck,
    Hand,
    Graveyard,
    Banished,
    ExtraDeck,
    MonsterZone,
    SpellTrapZone,
    FieldZone,
    ExtraMonsterZone,
}

impl ZoneKind {
    /// Every zone kind, list zones first.
    pub const ALL: [ZoneKind; 9] = [
        ZoneKind::Deck,
        ZoneKind::Hand,
        ZoneKind::Graveyard,
        ZoneKind::Banished,
        ZoneKind::ExtraDeck,
        ZoneKind::MonsterZone,
        ZoneKind::SpellTrapZone,
        ZoneKind::FieldZone,
        ZoneKind::ExtraMonsterZone,
    ];

    /// Number of slots for single-card zones, `None` for list zones.
    #[must_use]
    pub const fn slot_count(self) -> Option<usize> {
        match self {
            ZoneKind::MonsterZone | ZoneKind::SpellTrapZone => Some(5),
            ZoneKind::FieldZone => Some(1),
            ZoneKind::ExtraMonsterZone => Some(2),
            _ => None,
        }
    }

    /// Single-card slot zones are exactly the field zones.
    #[must_use]
    pub const fn is_field(self) -> bool {
        self.slot_count().is_some()
    }

    /// Zones that hold monsters on the field.
    #[must_use]
    pub const fn is_monster_field(self) -> bool {
        matches!(self, ZoneKind::MonsterZone | ZoneKind::ExtraMonsterZone)
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ZoneKind::Deck => "Deck",
            ZoneKind::Hand => "Hand",
            ZoneKind::Graveyard => "Graveyard",
            ZoneKind::Banished => "Banished",
            ZoneKind::ExtraDeck => "Extra Deck",
            ZoneKind::MonsterZone => "Monster Zone",
            ZoneKind::SpellTrapZone => "Spell/Trap Zone",
            ZoneKind::FieldZone => "Field Zone",
            ZoneKind::ExtraMonsterZone => "Extra Monster Zone",
        }
    }
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One single-card slot on the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub zone: ZoneKind,
    pub index: usize,
}

impl Slot {
    #[must_use]
    pub const fn new(zone: ZoneKind, index: usize) -> Self {
        Self { zone, index }
    }

    #[must_use]
    pub const fn monster(index: usize) -> Self {
        Self::new(ZoneKind::MonsterZone, index)
    }

    #[must_use]
    pub const fn spell_trap(index: usize) -> Self {
        Self::new(ZoneKind::SpellTrapZone, index)
    }

    #[must_use]
    pub const fn extra_monster(index: usize) -> Self {
        Self::new(ZoneKind::ExtraMonsterZone, index)
    }

    #[must_use]
    pub const fn field() -> Self {
        Self::new(ZoneKind::FieldZone, 0)
    }

    /// True if the zone has slots and the index is in range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self.zone.slot_count(), Some(n) if self.index < n)
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.zone {
            ZoneKind::FieldZone => f.write_str("Field Zone"),
            zone => write!(f, "{} {}", zone, self.index + 1),
        }
    }
}

/// Where an instance currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// In a zone. For list zones `index` is the position, for slot zones it
    /// is the slot.
    Zone { zone: ZoneKind, index: usize },
    /// Attached to a host as a material.
    Material { host: InstanceId, index: usize },
}

impl Location {
    #[must_use]
    pub const fn zone(zone: ZoneKind, index: usize) -> Self {
        Location::Zone { zone, index }
    }

    /// The zone kind, or `None` for attached materials.
    #[must_use]
    pub fn zone_kind(&self) -> Option<ZoneKind> {
        match self {
            Location::Zone { zone, .. } => Some(*zone),
            Location::Material { .. } => None,
        }
    }

    /// True for any single-card field slot. Attached materials are not on
    /// the field in their own right.
    #[must_use]
    pub fn is_field(&self) -> bool {
        self.zone_kind().is_some_and(ZoneKind::is_field)
    }

    /// The slot, if this is a field location.
    #[must_use]
    pub fn slot(&self) -> Option<Slot> {
        match *self {
            Location::Zone { zone, index } if zone.is_field() => Some(Slot::new(zone, index)),
            _ => None,
        }
    }
}

impl From<Slot> for Location {
    fn from(slot: Slot) -> Self {
        Location::Zone {
            zone: slot.zone,
            index: slot.index,
        }
    }
}
