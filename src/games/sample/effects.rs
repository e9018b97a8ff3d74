//! Effect handlers for the sample pool.

use crate::cards::CardFilter;
use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::core::state::DuelView;
use crate::effects::{CardEffect, EffectRegistry, Reason, TriggerContext};
use crate::engine::Engine;
use crate::interaction::Selector;
use crate::rules::MoveRequest;
use crate::summons::fusion_targets;
use crate::zones::{Slot, ZoneKind};

use super::cards::*;

/// Zones "Vale Fusion" takes materials from.
pub const FUSION_MATERIAL_ZONES: [ZoneKind; 3] = [ZoneKind::Hand, ZoneKind::MonsterZone, ZoneKind::ExtraMonsterZone];

/// Handlers for every card with an effect, plus the fixed chain order.
#[must_use]
pub fn registry() -> EffectRegistry {
    EffectRegistry::builder()
        .register(VALE_SCOUT, ScoutSearch)
        .register(EMBER_SPARK, SparkDraw)
        .register(EMBER_ASH, AshRecover)
        .register(EMBER_HERALD, HeraldRevive)
        .register(VALE_FUSION, FusionSpell)
        .register(VALE_BASTION, BastionBoost)
        .with_chain_priority(EMBER_HERALD, EMBER_SPARK)
        .build()
}

fn used_as_material(trigger: &TriggerContext) -> bool {
    trigger.reason == Reason::AsMaterial && trigger.destination().is_some()
}

// =============================================================================
// Vale Scout: search on summon
// =============================================================================

struct ScoutSearch;

impl ScoutSearch {
    fn targets() -> Selector {
        let filter = CardFilter::Monster
            .and(CardFilter::archetype("Vale"))
            .and(CardFilter::Not(Box::new(CardFilter::Card(VALE_SCOUT))));
        Selector::new(&[ZoneKind::Deck], filter)
    }
}

impl CardEffect for ScoutSearch {
    fn usage_slot(&self) -> Option<u8> {
        Some(0)
    }

    fn triggers_on(&self, trigger: &TriggerContext) -> bool {
        trigger.is_summon()
    }

    fn precondition(&self, view: &DuelView<'_>, _trigger: &TriggerContext) -> bool {
        !Self::targets().candidates(view).is_empty()
    }

    fn activate(&self, engine: &mut Engine, trigger: TriggerContext) -> Result<(), DuelError> {
        let source = trigger.source;
        engine.confirm(Some(source), "Use the effect of Vale Scout?", move |engine| {
            engine.record_usage(trigger.usage_key(0));
            engine.search(
                Some(source),
                "Add 1 \"Vale\" monster from the Deck to the hand",
                Self::targets(),
                |engine, picks| {
                    for pick in picks {
                        engine.move_card(MoveRequest::new(pick, ZoneKind::Hand))?;
                    }
                    Ok(())
                },
            )?;
            Ok(())
        });
        Ok(())
    }
}

// =============================================================================
// Ember Spark: draw when used as material
// =============================================================================

struct SparkDraw;

impl CardEffect for SparkDraw {
    fn usage_slot(&self) -> Option<u8> {
        Some(0)
    }

    fn triggers_on(&self, trigger: &TriggerContext) -> bool {
        used_as_material(trigger)
    }

    fn precondition(&self, view: &DuelView<'_>, _trigger: &TriggerContext) -> bool {
        !view.state.zones.deck.is_empty()
    }

    fn activate(&self, engine: &mut Engine, trigger: TriggerContext) -> Result<(), DuelError> {
        engine.confirm(Some(trigger.source), "Use the effect of Ember Spark?", move |engine| {
            engine.record_usage(trigger.usage_key(0));
            engine.draw()?;
            Ok(())
        });
        Ok(())
    }
}

// =============================================================================
// Ember Ash: recover a monster when used as material
// =============================================================================

struct AshRecover;

impl AshRecover {
    fn targets(source: InstanceId) -> Selector {
        Selector::new(&[ZoneKind::Graveyard], CardFilter::Monster.except(source))
    }
}

impl CardEffect for AshRecover {
    fn triggers_on(&self, trigger: &TriggerContext) -> bool {
        used_as_material(trigger)
    }

    fn precondition(&self, view: &DuelView<'_>, trigger: &TriggerContext) -> bool {
        !Self::targets(trigger.source).candidates(view).is_empty()
    }

    fn activate(&self, engine: &mut Engine, trigger: TriggerContext) -> Result<(), DuelError> {
        let source = trigger.source;
        engine.confirm(Some(source), "Use the effect of Ember Ash?", move |engine| {
            engine.search(
                Some(source),
                "Add 1 monster from the Graveyard to the hand",
                Self::targets(source),
                |engine, picks| {
                    for pick in picks {
                        engine.move_card(MoveRequest::new(pick, ZoneKind::Hand))?;
                    }
                    Ok(())
                },
            )?;
            Ok(())
        });
        Ok(())
    }
}

// =============================================================================
// Ember Herald: revive itself after being used as material
// =============================================================================

struct HeraldRevive;

fn free_main_zones(view: &DuelView<'_>) -> Vec<Slot> {
    view.state.zones.free_slots(ZoneKind::MonsterZone)
}

impl CardEffect for HeraldRevive {
    fn triggers_on(&self, trigger: &TriggerContext) -> bool {
        used_as_material(trigger) && trigger.destination() == Some(ZoneKind::Graveyard)
    }

    fn precondition(&self, view: &DuelView<'_>, trigger: &TriggerContext) -> bool {
        view.location(trigger.source).and_then(|l| l.zone_kind()) == Some(ZoneKind::Graveyard)
            && !free_main_zones(view).is_empty()
    }

    fn activate(&self, engine: &mut Engine, trigger: TriggerContext) -> Result<(), DuelError> {
        let source = trigger.source;
        engine.confirm(Some(source), "Use the effect of Ember Herald?", move |engine| {
            let slots = free_main_zones(&engine.view());
            engine.choose_zone(Some(source), "Special Summon Ember Herald to", slots, move |engine, slot| {
                engine.move_card(MoveRequest::to_slot(source, slot).special())?;
                Ok(())
            })?;
            Ok(())
        });
        Ok(())
    }
}

// =============================================================================
// Vale Fusion: Fusion Summon spell
// =============================================================================

struct FusionSpell;

impl CardEffect for FusionSpell {
    fn triggers_on(&self, trigger: &TriggerContext) -> bool {
        trigger.reason == Reason::Manual
            && matches!(trigger.destination(), Some(ZoneKind::Hand | ZoneKind::SpellTrapZone))
    }

    fn precondition(&self, view: &DuelView<'_>, _trigger: &TriggerContext) -> bool {
        !fusion_targets(view, &FUSION_MATERIAL_ZONES).is_empty()
    }

    fn activate(&self, engine: &mut Engine, trigger: TriggerContext) -> Result<(), DuelError> {
        // The spell is spent even if the summon is cancelled later
        engine.move_card(MoveRequest::new(trigger.source, ZoneKind::Graveyard))?;
        engine.fusion_summon(Some(trigger.source), &FUSION_MATERIAL_ZONES)?;
        Ok(())
    }
}

// =============================================================================
// Vale Bastion: detach a material, boost a monster
// =============================================================================

struct BastionBoost;

impl CardEffect for BastionBoost {
    fn usage_slot(&self) -> Option<u8> {
        Some(0)
    }

    fn triggers_on(&self, trigger: &TriggerContext) -> bool {
        trigger.reason == Reason::Manual && trigger.destination().is_some_and(ZoneKind::is_monster_field)
    }

    fn precondition(&self, view: &DuelView<'_>, trigger: &TriggerContext) -> bool {
        !view.state.zones.materials_of(trigger.source).is_empty()
    }

    fn activate(&self, engine: &mut Engine, trigger: TriggerContext) -> Result<(), DuelError> {
        let host = trigger.source;
        engine.confirm(Some(host), "Use the effect of Vale Bastion?", move |engine| {
            engine.target(
                Some(host),
                "Detach 1 material from Vale Bastion",
                Selector::materials_of(host),
                move |engine, picks| {
                    for material in picks {
                        engine.detach_material(host, material)?;
                    }
                    engine.record_usage(trigger.usage_key(0));
                    engine.target(
                        Some(host),
                        "Target 1 monster on the field to gain 500 ATK",
                        Selector::field_monsters(CardFilter::Monster),
                        |engine, picks| {
                            for pick in picks {
                                let attack = engine.view().effective_attack(pick).unwrap_or(0);
                                let mut modifiers = engine
                                    .state()
                                    .instance(pick)
                                    .map(|i| i.modifiers)
                                    .unwrap_or_default();
                                modifiers.attack = Some(attack + 500);
                                engine.set_modifiers(pick, modifiers)?;
                            }
                            Ok(())
                        },
                    )?;
                    Ok(())
                },
            )?;
            Ok(())
        });
        Ok(())
    }
}
