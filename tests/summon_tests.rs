//! Special Summon integration tests.
//!
//! Each procedure is driven through its requests the way a player would:
//! pick materials, pick a zone, and check that the board only changes at
//! the final step.

use solo_duel::games::sample::{self, *};
use solo_duel::{
    CardId, DuelError, Engine, EngineConfig, InstanceId, InteractionPhase, MoveRequest, Prompt, RequestId,
    RequestKind, Response, Slot, ZoneKind,
};

fn engine(deck: &[CardId]) -> Engine {
    let mut engine = sample::engine(EngineConfig::new().with_seed(42));
    engine.init_duel(deck).unwrap();
    engine
}

fn special(engine: &mut Engine, id: InstanceId, slot: Slot) {
    engine.move_card(MoveRequest::to_slot(id, slot).special()).unwrap();
}

fn open_id(engine: &Engine) -> RequestId {
    engine.open_request().expect("a request should be open").id
}

fn zone_of(engine: &Engine, id: InstanceId) -> Option<ZoneKind> {
    engine.state().zones.locate(id).and_then(|l| l.zone_kind())
}

// =============================================================================
// Fusion
// =============================================================================

#[test]
fn test_fusion_through_spell() {
    let mut engine = engine(&[VALE_FUSION, VALE_SCOUT, VALE_COLOSSUS, VALE_CHIMERA]);
    let (spell, scout, colossus, chimera) = (InstanceId(1), InstanceId(2), InstanceId(3), InstanceId(4));
    for _ in 0..3 {
        engine.draw().unwrap();
    }

    engine.activate(spell).unwrap();
    assert_eq!(zone_of(&engine, spell), Some(ZoneKind::Graveyard));
    assert_eq!(engine.interaction_phase(), InteractionPhase::AwaitingSearch);

    let id = open_id(&engine);
    engine.respond(id, Response::Pick(vec![chimera])).unwrap();
    assert_eq!(engine.interaction_phase(), InteractionPhase::AwaitingTarget);

    let id = open_id(&engine);
    engine.respond(id, Response::Pick(vec![scout, colossus])).unwrap();
    assert_eq!(engine.interaction_phase(), InteractionPhase::AwaitingZone);
    // Nothing has moved yet
    assert_eq!(engine.state().zones.hand.len(), 2);

    let id = open_id(&engine);
    engine.respond(id, Response::Zone(Slot::monster(2))).unwrap();

    let state = engine.state();
    assert_eq!(state.zones.at(Slot::monster(2)), Some(chimera));
    assert!(state.zones.hand.is_empty());
    assert_eq!(zone_of(&engine, scout), Some(ZoneKind::Graveyard));
    assert_eq!(zone_of(&engine, colossus), Some(ZoneKind::Graveyard));
    assert_eq!(
        engine.logs().last().unwrap(),
        "Fusion Summoned Vale Chimera to Monster Zone 3 using Vale Scout, Vale Colossus"
    );
    assert_eq!(engine.interaction_phase(), InteractionPhase::Idle);
    assert!(!engine.is_resolving());

    // The whole summon is one undo step
    engine.undo().unwrap();
    assert_eq!(zone_of(&engine, chimera), Some(ZoneKind::ExtraDeck));
    assert_eq!(engine.state().zones.hand.len(), 2);
    assert_eq!(zone_of(&engine, spell), Some(ZoneKind::Graveyard));
}

#[test]
fn test_fusion_banishes_graveyard_materials() {
    let mut engine = engine(&[VALE_SCOUT, VALE_COLOSSUS, VALE_CHIMERA]);
    let (scout, colossus, chimera) = (InstanceId(1), InstanceId(2), InstanceId(3));
    engine.move_card(MoveRequest::new(scout, ZoneKind::Graveyard)).unwrap();
    engine.draw().unwrap();

    let zones = [ZoneKind::Hand, ZoneKind::Graveyard];
    engine.fusion_summon(None, &zones).unwrap();
    let id = open_id(&engine);
    engine.respond(id, Response::Pick(vec![chimera])).unwrap();
    let id = open_id(&engine);
    engine.respond(id, Response::Pick(vec![scout, colossus])).unwrap();
    let id = open_id(&engine);
    engine.respond(id, Response::Zone(Slot::extra_monster(0))).unwrap();

    assert_eq!(zone_of(&engine, scout), Some(ZoneKind::Banished));
    assert_eq!(zone_of(&engine, colossus), Some(ZoneKind::Graveyard));
    assert_eq!(engine.state().zones.at(Slot::extra_monster(0)), Some(chimera));
}

#[test]
fn test_fusion_spell_needs_materials() {
    let mut engine = engine(&[VALE_FUSION, VALE_COLOSSUS, VALE_CHIMERA]);
    engine.draw().unwrap();
    engine.draw().unwrap();
    let before = engine.state().clone();

    let err = engine.activate(InstanceId(1)).unwrap_err();

    assert!(matches!(err, DuelError::MissingPrecondition(_)));
    assert_eq!(engine.state(), &before);
    assert!(engine.open_request().is_none());
}

#[test]
fn test_cancelled_fusion_keeps_the_spent_spell() {
    let mut engine = engine(&[VALE_FUSION, VALE_SCOUT, VALE_COLOSSUS, VALE_CHIMERA]);
    for _ in 0..3 {
        engine.draw().unwrap();
    }

    engine.activate(InstanceId(1)).unwrap();
    let id = open_id(&engine);
    engine.cancel(id).unwrap();

    assert!(engine.open_request().is_none());
    assert_eq!(zone_of(&engine, InstanceId(1)), Some(ZoneKind::Graveyard));
    assert_eq!(engine.state().zones.hand.len(), 2);
    assert_eq!(zone_of(&engine, InstanceId(4)), Some(ZoneKind::ExtraDeck));
}

// =============================================================================
// Synchro
// =============================================================================

fn synchro_board() -> Engine {
    let mut engine = engine(&[VALE_LANCER, VALE_WARDEN, VALE_SCOUT]);
    special(&mut engine, InstanceId(2), Slot::monster(0));
    // No other "Vale" monster is left in the Deck, so Scout's search stays quiet
    special(&mut engine, InstanceId(3), Slot::monster(1));
    assert!(engine.open_request().is_none());
    engine
}

#[test]
fn test_synchro_summon() {
    let mut engine = synchro_board();
    let (lancer, warden, scout) = (InstanceId(1), InstanceId(2), InstanceId(3));

    let id = engine.synchro_summon(lancer).unwrap();
    let request = engine.open_request().unwrap();
    assert_eq!(request.kind, RequestKind::Targeting);
    assert_eq!(request.source, Some(lancer));

    // One card is not a valid group
    let logs = engine.logs().len();
    assert!(engine.respond(id, Response::Pick(vec![warden])).is_err());
    assert_eq!(open_id(&engine), id);
    assert_eq!(engine.logs().len(), logs + 1);

    engine.respond(id, Response::Pick(vec![warden, scout])).unwrap();
    let request = engine.open_request().unwrap();
    let Prompt::Zones(slots) = &request.prompt else {
        panic!("expected a zone prompt");
    };
    assert_eq!(slots.len(), 7);

    let id = request.id;
    engine.respond(id, Response::Zone(Slot::extra_monster(0))).unwrap();

    assert_eq!(engine.state().zones.at(Slot::extra_monster(0)), Some(lancer));
    assert_eq!(engine.state().zones.graveyard.len(), 2);
    assert_eq!(
        engine.logs().last().unwrap(),
        "Synchro Summoned Vale Lancer to Extra Monster Zone 1 using Vale Warden, Vale Scout"
    );
}

#[test]
fn test_synchro_needs_a_tuner() {
    let mut engine = engine(&[VALE_LANCER, VALE_COLOSSUS, VALE_COLOSSUS]);
    special(&mut engine, InstanceId(2), Slot::monster(0));
    special(&mut engine, InstanceId(3), Slot::monster(1));

    let err = engine.synchro_summon(InstanceId(1)).unwrap_err();
    assert!(matches!(err, DuelError::MissingPrecondition(_)));
    assert!(engine.open_request().is_none());
}

#[test]
fn test_cancel_before_zone_leaves_the_board() {
    let mut engine = synchro_board();
    let before = engine.state().clone();
    let history = engine.history().len();

    let id = engine.synchro_summon(InstanceId(1)).unwrap();
    engine.respond(id, Response::Pick(vec![InstanceId(2), InstanceId(3)])).unwrap();
    let id = open_id(&engine);
    engine.cancel(id).unwrap();

    assert_eq!(engine.state(), &before);
    assert_eq!(engine.history().len(), history);
    assert_eq!(engine.interaction_phase(), InteractionPhase::Idle);
}

// =============================================================================
// Xyz
// =============================================================================

#[test]
fn test_xyz_and_detach_cost() {
    let mut engine = engine(&[VALE_BASTION, VALE_WARDEN, VALE_WARDEN]);
    let (bastion, a, b) = (InstanceId(1), InstanceId(2), InstanceId(3));
    special(&mut engine, a, Slot::monster(0));
    special(&mut engine, b, Slot::monster(1));

    let id = engine.xyz_summon(bastion).unwrap();
    engine.respond(id, Response::Pick(vec![a, b])).unwrap();
    let id = open_id(&engine);
    engine.respond(id, Response::Zone(Slot::monster(1))).unwrap();
    assert_eq!(engine.state().zones.at(Slot::monster(1)), Some(bastion));
    assert!(engine.state().zones.graveyard.is_empty());

    // Declining the confirm pays nothing
    engine.activate(bastion).unwrap();
    let request = engine.open_request().unwrap();
    assert_eq!(request.prompt, Prompt::Confirm);
    assert_eq!(request.source, Some(bastion));
    let id = request.id;
    engine.respond(id, Response::Confirm(false)).unwrap();
    assert_eq!(engine.state().zones.materials_of(bastion), vec![a, b]);

    engine.activate(bastion).unwrap();
    let id = open_id(&engine);
    engine.respond(id, Response::Confirm(true)).unwrap();
    assert_eq!(engine.interaction_phase(), InteractionPhase::AwaitingTarget);
    let id = open_id(&engine);
    engine.respond(id, Response::Pick(vec![a])).unwrap();
    assert_eq!(engine.state().zones.materials_of(bastion), vec![b]);
    assert_eq!(engine.logs().last().unwrap(), "Detached Vale Warden from Vale Bastion");

    let id = open_id(&engine);
    engine.respond(id, Response::Pick(vec![bastion])).unwrap();
    assert_eq!(engine.view().effective_attack(bastion), Some(2700));
    assert_eq!(engine.logs().last().unwrap(), "Set Vale Bastion to ATK 2700");

    let err = engine.activate(bastion).unwrap_err();
    assert_eq!(err, DuelError::UsageExhausted("Vale Bastion".to_string()));

    engine.end_turn().unwrap();
    engine.activate(bastion).unwrap();
    assert_eq!(engine.interaction_phase(), InteractionPhase::AwaitingSelection);
}

#[test]
fn test_xyz_needs_matching_levels() {
    let mut engine = engine(&[VALE_BASTION, VALE_WARDEN, VALE_COLOSSUS]);
    special(&mut engine, InstanceId(2), Slot::monster(0));
    special(&mut engine, InstanceId(3), Slot::monster(1));

    assert!(engine.xyz_summon(InstanceId(1)).is_err());
    assert!(engine.xyz_summon(InstanceId(2)).is_err());
}

// =============================================================================
// Link
// =============================================================================

#[test]
fn test_link_with_double_material() {
    let mut engine = engine(&[VALE_LINK_SPIDER, VALE_TWIN_CORE]);
    let (spider, core) = (InstanceId(1), InstanceId(2));
    special(&mut engine, core, Slot::monster(0));

    let id = engine.link_summon(spider).unwrap();
    engine.respond(id, Response::Pick(vec![core])).unwrap();

    let request = engine.open_request().unwrap();
    assert_eq!(request.prompt, Prompt::Zones(vec![Slot::extra_monster(0), Slot::extra_monster(1)]));
    let id = request.id;
    engine.respond(id, Response::Zone(Slot::extra_monster(1))).unwrap();

    assert_eq!(engine.state().zones.at(Slot::extra_monster(1)), Some(spider));
    assert_eq!(
        engine.logs().last().unwrap(),
        "Link Summoned Vale Link Spider to Extra Monster Zone 2 using Vale Twin Core"
    );
}

#[test]
fn test_link_rating_must_match() {
    let mut engine = engine(&[VALE_LINK_SPIDER, VALE_WARDEN, VALE_WARDEN, VALE_WARDEN]);
    for (i, id) in [2, 3, 4].into_iter().enumerate() {
        special(&mut engine, InstanceId(id), Slot::monster(i));
    }

    let id = engine.link_summon(InstanceId(1)).unwrap();
    let err = engine
        .respond(id, Response::Pick(vec![InstanceId(2), InstanceId(3), InstanceId(4)]))
        .unwrap_err();
    assert!(matches!(err, DuelError::InvalidResponse(_)));

    engine.respond(id, Response::Pick(vec![InstanceId(2), InstanceId(3)])).unwrap();
    assert_eq!(engine.interaction_phase(), InteractionPhase::AwaitingZone);
}

// =============================================================================
// Pendulum
// =============================================================================

#[test]
fn test_pendulum_summon() {
    let mut engine = engine(&[VALE_ORACLE, VALE_SENTINEL, VALE_SCOUT, VALE_COLOSSUS]);
    let (oracle, sentinel, scout, colossus) = (InstanceId(1), InstanceId(2), InstanceId(3), InstanceId(4));
    for _ in 0..4 {
        engine.draw().unwrap();
    }
    assert!(engine.pendulum_summon().is_err());

    engine.move_card(MoveRequest::to_slot(oracle, Slot::spell_trap(0))).unwrap();
    engine.move_card(MoveRequest::to_slot(sentinel, Slot::spell_trap(4))).unwrap();
    let history = engine.history().len();

    let id = engine.pendulum_summon().unwrap();
    engine.respond(id, Response::Pick(vec![scout, colossus])).unwrap();

    let id = open_id(&engine);
    engine.respond(id, Response::Zone(Slot::monster(0))).unwrap();

    // The first monster's zone is reserved for the second prompt
    let id = open_id(&engine);
    assert!(engine.respond(id, Response::Zone(Slot::monster(0))).is_err());
    assert_eq!(engine.state().zones.hand.len(), 2);
    engine.respond(id, Response::Zone(Slot::monster(3))).unwrap();

    let state = engine.state();
    assert_eq!(state.zones.at(Slot::monster(0)), Some(scout));
    assert_eq!(state.zones.at(Slot::monster(3)), Some(colossus));
    assert_eq!(state.pendulum_summon_count, 1);
    assert!(!state.normal_summon_used);
    assert!(state.instance(scout).unwrap().flags.pendulum_summoned);
    assert_eq!(
        engine.logs().last().unwrap(),
        "Pendulum Summoned Vale Scout to Monster Zone 1, Vale Colossus to Monster Zone 4"
    );
    assert_eq!(engine.history().len(), history + 1);

    engine.undo().unwrap();
    assert_eq!(engine.state().zones.hand.len(), 2);
    assert_eq!(engine.state().pendulum_summon_count, 0);
}

#[test]
fn test_pendulum_from_extra_deck_goes_first() {
    let mut engine = engine(&[VALE_ORACLE, VALE_SENTINEL, VALE_ORACLE, VALE_WARDEN]);
    let (oracle, sentinel, spare, warden) = (InstanceId(1), InstanceId(2), InstanceId(3), InstanceId(4));
    engine.move_card(MoveRequest::to_slot(oracle, Slot::spell_trap(0))).unwrap();
    engine.move_card(MoveRequest::to_slot(sentinel, Slot::spell_trap(4))).unwrap();
    special(&mut engine, spare, Slot::monster(0));
    engine.move_card(MoveRequest::new(spare, ZoneKind::Graveyard)).unwrap();
    assert_eq!(zone_of(&engine, spare), Some(ZoneKind::ExtraDeck));
    engine.draw().unwrap();

    let id = engine.pendulum_summon().unwrap();
    engine.respond(id, Response::Pick(vec![warden, spare])).unwrap();

    let request = engine.open_request().unwrap();
    assert_eq!(request.source, Some(spare));
    assert_eq!(request.prompt, Prompt::Zones(vec![Slot::extra_monster(0), Slot::extra_monster(1)]));
}
