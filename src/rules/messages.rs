//! Log feed templates.
//!
//! Each successful move writes exactly one line, chosen by destination,
//! summon variant and whether it was a Normal or Special Summon.

use crate::zones::{Location, Slot, ZoneKind};

use super::context::SummonVariant;

/// Everything a move line needs.
#[derive(Clone, Debug)]
pub struct MoveLine<'a> {
    pub name: &'a str,
    /// Host name when the card was an attached material.
    pub host: Option<&'a str>,
    pub from: Location,
    pub to: Location,
    pub normal_summon: bool,
    pub special: bool,
    pub variant: Option<SummonVariant>,
    pub face_up: bool,
}

impl MoveLine<'_> {
    #[must_use]
    pub fn render(&self) -> String {
        let name = self.name;
        let from_zone = self.from.zone_kind();

        if let Some(slot) = self.to.slot() {
            return match slot.zone {
                ZoneKind::MonsterZone | ZoneKind::ExtraMonsterZone => self.monster_line(slot),
                ZoneKind::FieldZone => format!("Activated {name} in the Field Zone"),
                _ if self.from.is_field() => format!("Moved {name} to {slot}"),
                _ => format!("Placed {name} in {slot}"),
            };
        }

        let to_zone = self.to.zone_kind().unwrap_or(ZoneKind::Graveyard);
        if let Some(host) = self.host {
            return match to_zone {
                ZoneKind::Graveyard => format!("Detached {name} from {host}"),
                zone => format!("Detached {name} from {host} to the {zone}"),
            };
        }
        match to_zone {
            ZoneKind::Hand => match from_zone {
                Some(ZoneKind::Deck) => format!("Added {name} from the Deck to the hand"),
                Some(ZoneKind::Graveyard) => format!("Added {name} from the Graveyard to the hand"),
                _ => format!("Returned {name} to the hand"),
            },
            ZoneKind::Deck => format!("Returned {name} to the Deck"),
            ZoneKind::Graveyard => format!("Sent {name} to the Graveyard"),
            ZoneKind::Banished => format!("Banished {name}"),
            ZoneKind::ExtraDeck if self.face_up => format!("Added {name} to the Extra Deck face-up"),
            ZoneKind::ExtraDeck => format!("Returned {name} to the Extra Deck"),
            zone => format!("Moved {name} to the {zone}"),
        }
    }

    fn monster_line(&self, slot: Slot) -> String {
        let name = self.name;
        if let Some(variant) = self.variant {
            format!("{variant} Summoned {name} to {slot}")
        } else if self.normal_summon {
            format!("Normal Summoned {name} to {slot}")
        } else if self.from.is_field() {
            format!("Moved {name} to {slot}")
        } else if self.special {
            format!("Special Summoned {name} to {slot}")
        } else {
            format!("Placed {name} in {slot}")
        }
    }
}

/// Single line for an Extra Deck summon and its materials.
#[must_use]
pub fn summon_line(variant: SummonVariant, name: &str, slot: Slot, materials: &[String]) -> String {
    if materials.is_empty() {
        format!("{variant} Summoned {name} to {slot}")
    } else {
        format!("{variant} Summoned {name} to {slot} using {}", materials.join(", "))
    }
}
