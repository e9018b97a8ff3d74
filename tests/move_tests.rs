//! Move engine integration tests.
//!
//! These tests drive the public action surface with the sample card pool
//! and check placement rules, redirects, cascades and the log feed.

use solo_duel::games::sample::{self, *};
use solo_duel::{
    CardId, DuelError, Engine, EngineConfig, InstanceId, Modifiers, MoveRequest, RequestId, Response, Slot,
    ZoneKind,
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

// =============================================================================
// Initialization and deck actions
// =============================================================================

/// Deck list [level 4 monster, Fusion monster] through draw and a Normal
/// Summon.
#[test]
fn test_end_to_end_example() {
    let mut engine = engine(&[VALE_WARDEN, VALE_CHIMERA]);
    let (x, y) = (InstanceId(1), InstanceId(2));

    let zones = &engine.state().zones;
    assert_eq!(zones.deck.iter().copied().collect::<Vec<_>>(), vec![x]);
    assert_eq!(zones.extra_deck.iter().copied().collect::<Vec<_>>(), vec![y]);

    assert_eq!(engine.draw().unwrap(), Some(x));
    assert!(engine.state().zones.deck.is_empty());
    assert_eq!(engine.state().zones.hand[0], x);

    let logs = engine.logs().len();
    engine.move_card(MoveRequest::new(x, ZoneKind::MonsterZone).at(2)).unwrap();

    let state = engine.state();
    assert_eq!(state.zones.monster_zones[2], Some(x));
    assert!(state.normal_summon_used);
    assert_eq!(engine.logs().len(), logs + 1);
    assert_eq!(engine.logs().last().unwrap(), "Normal Summoned Vale Warden to Monster Zone 3");
}

#[test]
fn test_init_rejects_unknown_card() {
    let mut engine = sample::engine(EngineConfig::new());
    let err = engine.init_duel(&[VALE_SCOUT, CardId::new(999)]).unwrap_err();

    assert_eq!(err, DuelError::UnknownCard(CardId::new(999)));
    assert_eq!(engine.state().zones.total_cards(), 0);
    assert_eq!(engine.logs().len(), 1);
}

#[test]
fn test_draw_from_empty_deck() {
    let mut engine = engine(&[VALE_CHIMERA]);

    assert_eq!(engine.draw().unwrap(), None);
    assert_eq!(engine.logs(), &["The Deck is empty".to_string()]);
    assert!(!engine.can_undo());
}

#[test]
fn test_shuffle_is_seeded() {
    let deck = sample::deck();
    let mut a = sample::engine(EngineConfig::new().with_seed(5));
    let mut b = sample::engine(EngineConfig::new().with_seed(5));
    a.init_duel(&deck).unwrap();
    b.init_duel(&deck).unwrap();

    a.shuffle_deck().unwrap();
    b.shuffle_deck().unwrap();

    assert_eq!(a.state().zones.deck, b.state().zones.deck);
    assert_eq!(a.state().zones.deck.len(), 20);
    assert_eq!(a.logs().last().unwrap(), "Shuffled the Deck");
}

#[test]
fn test_copy_management() {
    let mut engine = engine(&[VALE_WARDEN]);

    let copy = engine.add_copy(VALE_LANCER, ZoneKind::Hand).unwrap();
    assert_eq!(copy, InstanceId(2));
    assert_eq!(engine.state().zones.locate(copy).unwrap().zone_kind(), Some(ZoneKind::ExtraDeck));

    assert!(engine.add_copy(VALE_WARDEN, ZoneKind::MonsterZone).is_err());

    engine.remove_instance(InstanceId(1)).unwrap();
    assert!(engine.state().instance(InstanceId(1)).is_none());
    assert!(engine.state().zones.deck.is_empty());
    assert_eq!(engine.logs().last().unwrap(), "Removed Vale Warden from the duel");
}

// =============================================================================
// Placement rules
// =============================================================================

#[test]
fn test_capacity_guard() {
    let mut engine = engine(&[VALE_WARDEN, VALE_COLOSSUS]);
    special(&mut engine, InstanceId(1), Slot::monster(0));
    let before = engine.state().clone();
    let logs = engine.logs().len();
    let history = engine.history().len();

    let err = engine
        .move_card(MoveRequest::to_slot(InstanceId(2), Slot::monster(0)).special())
        .unwrap_err();

    assert!(matches!(err, DuelError::IllegalPlacement(_)));
    assert_eq!(engine.state(), &before);
    assert_eq!(engine.logs().len(), logs + 1);
    assert_eq!(engine.history().len(), history);
}

#[test]
fn test_spell_trap_rules() {
    let mut engine = engine(&[VALE_WARDEN, VALE_ORACLE, VALE_WARD, VALE_BANNER]);
    let (warden, oracle, ward, banner) = (InstanceId(1), InstanceId(2), InstanceId(3), InstanceId(4));

    assert!(engine.move_card(MoveRequest::to_slot(warden, Slot::spell_trap(1))).is_err());
    assert!(engine.move_card(MoveRequest::to_slot(oracle, Slot::spell_trap(2))).is_err());
    engine.move_card(MoveRequest::to_slot(oracle, Slot::spell_trap(4))).unwrap();
    engine.move_card(MoveRequest::to_slot(ward, Slot::spell_trap(2))).unwrap();
    assert_eq!(engine.logs().last().unwrap(), "Placed Vale Ward in Spell/Trap Zone 3");

    assert!(engine.move_card(MoveRequest::new(warden, ZoneKind::FieldZone)).is_err());
    engine.move_card(MoveRequest::new(banner, ZoneKind::FieldZone)).unwrap();
    assert_eq!(engine.logs().last().unwrap(), "Activated Vale Banner in the Field Zone");
}

#[test]
fn test_extra_monster_zones_are_exclusive() {
    let mut engine = engine(&[VALE_LANCER, VALE_BASTION]);
    let (lancer, bastion) = (InstanceId(1), InstanceId(2));
    special(&mut engine, lancer, Slot::extra_monster(0));

    let err = engine
        .move_card(MoveRequest::to_slot(bastion, Slot::extra_monster(1)).special())
        .unwrap_err();
    assert!(matches!(err, DuelError::IllegalPlacement(_)));

    // Moving the occupant across is allowed
    engine.move_card(MoveRequest::to_slot(lancer, Slot::extra_monster(1))).unwrap();
    assert_eq!(engine.state().zones.at(Slot::extra_monster(1)), Some(lancer));
}

#[test]
fn test_normal_summon_once_per_turn() {
    let mut engine = engine(&[VALE_WARDEN, VALE_WARDEN]);
    engine.draw().unwrap();
    engine.draw().unwrap();

    engine.move_card(MoveRequest::new(InstanceId(1), ZoneKind::MonsterZone)).unwrap();
    assert!(engine.move_card(MoveRequest::new(InstanceId(2), ZoneKind::MonsterZone)).is_err());

    engine.end_turn().unwrap();
    assert_eq!(engine.logs().last().unwrap(), "Turn 2 started");
    engine.move_card(MoveRequest::new(InstanceId(2), ZoneKind::MonsterZone)).unwrap();
    assert_eq!(engine.state().zones.at(Slot::monster(1)), Some(InstanceId(2)));
}

#[test]
fn test_tribute_summon_and_shortfall() {
    let mut engine = engine(&[VALE_COLOSSUS, VALE_WARDEN, VALE_WARDEN, VALE_COLOSSUS]);
    let (colossus, a, b, second) = (InstanceId(1), InstanceId(2), InstanceId(3), InstanceId(4));
    engine.draw().unwrap();
    special(&mut engine, a, Slot::monster(0));
    special(&mut engine, b, Slot::monster(1));

    engine
        .move_card(MoveRequest::new(colossus, ZoneKind::MonsterZone).with_tributes(vec![a, b]))
        .unwrap();
    // The first zone freed by a tribute is taken
    assert_eq!(engine.state().zones.graveyard.len(), 2);
    assert_eq!(engine.state().zones.at(Slot::monster(0)), Some(colossus));

    engine.end_turn().unwrap();
    engine.draw().unwrap();
    engine.move_card(MoveRequest::new(second, ZoneKind::MonsterZone)).unwrap();

    let logs = engine.logs();
    assert!(logs[logs.len() - 2].contains("needs 2 tribute(s)"));
    assert_eq!(logs[logs.len() - 1], "Normal Summoned Vale Colossus to Monster Zone 2");
}

#[test]
fn test_tribute_summon_onto_a_full_row() {
    let mut engine = engine(&[VALE_COLOSSUS, VALE_WARDEN, VALE_WARDEN, VALE_WARDEN, VALE_WARDEN, VALE_WARDEN]);
    let colossus = InstanceId(1);
    engine.draw().unwrap();
    for (i, id) in (2..=6).map(InstanceId).enumerate() {
        special(&mut engine, id, Slot::monster(i));
    }
    let tributes = vec![InstanceId(2), InstanceId(3)];

    // Onto the first tribute's own zone
    engine
        .move_card(MoveRequest::new(colossus, ZoneKind::MonsterZone).at(0).with_tributes(tributes.clone()))
        .unwrap();
    assert_eq!(engine.state().zones.at(Slot::monster(0)), Some(colossus));
    assert_eq!(engine.state().zones.at(Slot::monster(1)), None);
    assert_eq!(engine.logs().last().unwrap(), "Normal Summoned Vale Colossus to Monster Zone 1");

    // Without a zone, the first freed one
    engine.undo().unwrap();
    assert_eq!(engine.state().zones.at(Slot::monster(0)), Some(InstanceId(2)));
    engine
        .move_card(MoveRequest::new(colossus, ZoneKind::MonsterZone).with_tributes(tributes))
        .unwrap();
    assert_eq!(engine.state().zones.at(Slot::monster(0)), Some(colossus));
    assert_eq!(engine.state().zones.graveyard.len(), 2);
}

// =============================================================================
// Redirects and cascades
// =============================================================================

#[test]
fn test_pendulum_redirect() {
    let mut engine = engine(&[VALE_ORACLE]);
    let oracle = InstanceId(1);
    special(&mut engine, oracle, Slot::monster(0));

    let moved = engine.move_card(MoveRequest::new(oracle, ZoneKind::Graveyard)).unwrap();

    assert_eq!(moved.to.zone_kind(), Some(ZoneKind::ExtraDeck));
    assert!(engine.state().instance(oracle).unwrap().face_up);
    assert_eq!(engine.logs().last().unwrap(), "Added Vale Oracle to the Extra Deck face-up");
}

#[test]
fn test_extra_deck_redirect() {
    let mut engine = engine(&[VALE_LANCER, VALE_LINK_SPIDER]);
    let (lancer, spider) = (InstanceId(1), InstanceId(2));
    special(&mut engine, lancer, Slot::monster(0));
    special(&mut engine, spider, Slot::extra_monster(0));

    engine.move_card(MoveRequest::new(lancer, ZoneKind::Hand)).unwrap();
    engine.move_card(MoveRequest::new(spider, ZoneKind::Deck)).unwrap();

    let state = engine.state();
    for id in [lancer, spider] {
        assert_eq!(state.zones.locate(id).unwrap().zone_kind(), Some(ZoneKind::ExtraDeck));
        assert!(!state.instance(id).unwrap().face_up);
    }
    assert!(state.zones.hand.is_empty());
}

#[test]
fn test_banish_on_leave_flag() {
    let mut engine = engine(&[VALE_WARDEN]);
    let warden = InstanceId(1);
    special(&mut engine, warden, Slot::monster(0));
    let mut flags = engine.state().instance(warden).unwrap().flags;
    flags.banish_on_leave = true;
    engine.set_flags(warden, flags).unwrap();

    engine.move_card(MoveRequest::new(warden, ZoneKind::Graveyard)).unwrap();

    assert_eq!(engine.state().zones.banished[0], warden);
    assert_eq!(engine.logs().last().unwrap(), "Banished Vale Warden");
}

#[test]
fn test_modifiers_reset_when_leaving_the_field() {
    let mut engine = engine(&[VALE_WARDEN]);
    let warden = InstanceId(1);
    special(&mut engine, warden, Slot::monster(0));
    engine
        .set_modifiers(warden, Modifiers { attack: Some(2000), ..Modifiers::default() })
        .unwrap();
    assert_eq!(engine.logs().last().unwrap(), "Set Vale Warden to ATK 2000");

    engine.move_card(MoveRequest::to_slot(warden, Slot::monster(4))).unwrap();
    assert_eq!(engine.view().effective_attack(warden), Some(2000));

    engine.move_card(MoveRequest::new(warden, ZoneKind::Hand)).unwrap();
    assert_eq!(engine.view().effective_attack(warden), Some(1000));
    assert!(engine.set_modifiers(warden, Modifiers::default()).is_err());
}

#[test]
fn test_material_cascade() {
    let mut engine = engine(&[VALE_BASTION, VALE_WARDEN, VALE_WARDEN]);
    let (bastion, a, b) = (InstanceId(1), InstanceId(2), InstanceId(3));
    special(&mut engine, a, Slot::monster(0));
    special(&mut engine, b, Slot::monster(1));

    let id = engine.xyz_summon(bastion).unwrap();
    engine.respond(id, Response::Pick(vec![a, b])).unwrap();
    let id = open_id(&engine);
    engine.respond(id, Response::Zone(Slot::monster(0))).unwrap();
    assert_eq!(engine.state().zones.materials_of(bastion), vec![a, b]);
    let logs = engine.logs().len();

    let moved = engine.move_card(MoveRequest::new(bastion, ZoneKind::Graveyard)).unwrap();

    let state = engine.state();
    assert_eq!(moved.cascaded, vec![a, b]);
    for id in [a, b] {
        assert_eq!(state.zones.locate(id).unwrap().zone_kind(), Some(ZoneKind::Graveyard));
    }
    assert!(state.zones.materials.is_empty());
    assert_eq!(state.zones.graveyard.iter().copied().collect::<Vec<_>>(), vec![a, b, bastion]);
    assert_eq!(engine.logs().len(), logs + 1);
}

#[test]
fn test_drag_moves() {
    let mut engine = engine(&[VALE_WARDEN]);
    let warden = InstanceId(1);
    special(&mut engine, warden, Slot::monster(0));
    let logs = engine.logs().len();

    engine.move_card(MoveRequest::to_slot(warden, Slot::monster(3)).dragged()).unwrap();
    assert_eq!(engine.logs().len(), logs);

    // Dropped back on its own slot
    let history = engine.history().len();
    let moved = engine.move_card(MoveRequest::to_slot(warden, Slot::monster(3)).dragged()).unwrap();
    assert!(moved.is_noop());
    assert_eq!(engine.history().len(), history);

    let mut logged = sample::engine(EngineConfig::new().logging_drag_moves());
    logged.init_duel(&[VALE_WARDEN]).unwrap();
    special(&mut logged, warden, Slot::monster(0));
    logged.move_card(MoveRequest::to_slot(warden, Slot::monster(3)).dragged()).unwrap();
    assert_eq!(logged.logs().last().unwrap(), "Moved Vale Warden to Monster Zone 4");
}
