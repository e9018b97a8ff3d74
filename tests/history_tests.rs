//! History integration tests.
//!
//! These tests verify undo, jump-to-log, replay frame building and saved
//! archives against sessions driven through the public engine API.

use std::sync::atomic::Ordering;

use solo_duel::games::sample::{self, *};
use solo_duel::{
    Archive, ArchiveStore, CardId, DuelError, Engine, EngineConfig, FrameKind, InstanceId, MemoryArchiveStore,
    MoveRequest, Replay, Response, Slot, ZoneKind,
};

fn engine_with(config: EngineConfig, deck: &[CardId]) -> Engine {
    let mut engine = sample::engine(config);
    engine.init_duel(deck).unwrap();
    engine
}

/// Four committed changes, one log line each.
fn session(config: EngineConfig) -> Engine {
    let mut engine = engine_with(config, &[VALE_WARDEN, VALE_COLOSSUS, EMBER_SPARK]);
    let (warden, colossus) = (InstanceId(1), InstanceId(2));
    engine.draw().unwrap();
    engine.draw().unwrap();
    engine.move_card(MoveRequest::new(warden, ZoneKind::MonsterZone)).unwrap();
    engine.move_card(MoveRequest::new(colossus, ZoneKind::Graveyard)).unwrap();
    engine
}

/// Pendulum Summon two monsters after setting both scales.
fn pendulum_session(config: EngineConfig) -> Engine {
    let mut engine = engine_with(config, &[VALE_ORACLE, VALE_SENTINEL, VALE_SCOUT, VALE_COLOSSUS]);
    let (oracle, sentinel, scout, colossus) = (InstanceId(1), InstanceId(2), InstanceId(3), InstanceId(4));
    for _ in 0..4 {
        engine.draw().unwrap();
    }
    engine.move_card(MoveRequest::to_slot(oracle, Slot::spell_trap(0))).unwrap();
    engine.move_card(MoveRequest::to_slot(sentinel, Slot::spell_trap(4))).unwrap();

    let id = engine.pendulum_summon().unwrap();
    engine.respond(id, Response::Pick(vec![scout, colossus])).unwrap();
    for slot in [Slot::monster(0), Slot::monster(3)] {
        let id = engine.open_request().unwrap().id;
        engine.respond(id, Response::Zone(slot)).unwrap();
    }
    engine
}

// =============================================================================
// Undo
// =============================================================================

#[test]
fn test_undo_walks_back_to_the_start() {
    let mut engine = session(EngineConfig::new());
    assert_eq!(
        engine.logs(),
        &[
            "Drew Vale Warden".to_string(),
            "Drew Vale Colossus".to_string(),
            "Normal Summoned Vale Warden to Monster Zone 1".to_string(),
            "Sent Vale Colossus to the Graveyard".to_string(),
        ]
    );
    assert_eq!(engine.history().len(), 4);

    engine.undo().unwrap();
    assert_eq!(engine.state().zones.hand.len(), 1);
    assert_eq!(engine.state().zones.hand[0], InstanceId(2));
    assert_eq!(engine.logs().len(), 3);

    engine.undo().unwrap();
    assert!(!engine.state().normal_summon_used);
    assert_eq!(engine.state().zones.at(Slot::monster(0)), None);

    engine.undo().unwrap();
    engine.undo().unwrap();
    assert_eq!(engine.state().zones.deck.len(), 3);
    assert!(engine.logs().is_empty());
    assert!(!engine.can_undo());

    assert_eq!(engine.undo().unwrap_err(), DuelError::NothingToUndo);
    assert_eq!(engine.logs().len(), 1);
}

#[test]
fn test_rejected_action_takes_no_snapshot() {
    let mut engine = session(EngineConfig::new());
    engine.move_card(MoveRequest::new(InstanceId(2), ZoneKind::Hand)).unwrap();
    let (history, logs) = (engine.history().len(), engine.logs().len());

    // Second Normal Summon this turn
    assert!(engine
        .move_card(MoveRequest::new(InstanceId(2), ZoneKind::MonsterZone))
        .is_err());
    assert_eq!(engine.history().len(), history);
    assert_eq!(engine.logs().len(), logs + 1);
}

#[test]
fn test_history_cap_drops_the_oldest() {
    let mut engine = session(EngineConfig::new().with_max_history(2));
    assert_eq!(engine.history().len(), 2);

    engine.undo().unwrap();
    engine.undo().unwrap();
    assert_eq!(engine.state().zones.hand.len(), 2);
    assert!(engine.undo().is_err());
}

// =============================================================================
// Jump to log
// =============================================================================

#[test]
fn test_jump_shows_the_board_after_a_line() {
    let mut engine = session(EngineConfig::new());
    let live = engine.state().clone();

    engine.jump_to_log(1).unwrap();
    assert!(engine.is_jumped());
    assert_eq!(engine.state().zones.hand.len(), 2);
    assert_eq!(engine.logs().len(), 2);
    assert_eq!(engine.logs().last().unwrap(), "Drew Vale Colossus");

    engine.return_from_jump().unwrap();
    assert_eq!(engine.state(), &live);
    assert_eq!(engine.logs().len(), 4);
    assert_eq!(engine.history().len(), 4);
}

#[test]
fn test_undo_while_jumped_stays_in_the_past() {
    let mut engine = session(EngineConfig::new());
    engine.jump_to_log(2).unwrap();
    assert_eq!(engine.state().zones.at(Slot::monster(0)), Some(InstanceId(1)));

    engine.undo().unwrap();
    assert_eq!(engine.state().zones.hand.len(), 2);

    engine.return_from_jump().unwrap();
    assert_eq!(engine.state().zones.graveyard.len(), 1);
    assert_eq!(engine.state().zones.graveyard[0], InstanceId(2));
}

#[test]
fn test_last_line_cannot_be_jumped_to() {
    let mut engine = session(EngineConfig::new());
    assert_eq!(engine.jump_to_log(3).unwrap_err(), DuelError::NoSnapshotForLogLine(3));
    assert!(!engine.is_jumped());
    assert_eq!(engine.return_from_jump().unwrap_err(), DuelError::NotJumped);
}

// =============================================================================
// Replay
// =============================================================================

#[test]
fn test_replay_ends_on_the_live_board() {
    let engine = session(EngineConfig::new().with_replay_delay(800));
    let replay = engine.replay(2.0);

    assert_eq!(replay.len(), 5);
    let last = replay.frames().last().unwrap();
    assert_eq!(&last.state, engine.state());
    assert_eq!(replay.visible_logs(last).len(), 4);
    assert!(replay.visible_logs(&replay.frames()[0]).is_empty());
    assert!(replay.frames().iter().all(|f| f.delay.as_millis() == 400));
}

#[test]
fn test_replay_cues_the_pendulum_summon() {
    let engine = pendulum_session(EngineConfig::new().with_replay_delay(0).with_pendulum_cue(0));
    let replay = engine.replay(1.0);

    // Seven snapshots, the live board and one cue
    assert_eq!(replay.len(), 9);
    let kinds: Vec<FrameKind> = replay.frames().iter().map(|f| f.kind).collect();
    assert_eq!(kinds[7], FrameKind::PendulumCue);
    assert_eq!(kinds.iter().filter(|k| **k == FrameKind::PendulumCue).count(), 1);
    assert_eq!(replay.frames()[7].state.pendulum_summon_count, 0);
    assert_eq!(replay.frames()[8].state.pendulum_summon_count, 1);

    let mut lines = Vec::new();
    assert_eq!(replay.play(|_, logs| lines.push(logs.len())), 9);
    assert_eq!(lines.last(), Some(&engine.logs().len()));
}

#[test]
fn test_replay_stops_on_request() {
    let engine = session(EngineConfig::new().with_replay_delay(0));
    let replay = engine.replay(1.0);
    let stop = replay.stop_handle();

    let shown = replay.play(|frame, _| {
        if frame.log_len == 2 {
            stop.store(true, Ordering::Relaxed);
        }
    });
    assert_eq!(shown, 3);
}

// =============================================================================
// Archives
// =============================================================================

#[test]
fn test_archive_round_trip_and_restore() {
    let engine = session(EngineConfig::new());
    let archive = engine.archive(Some("board.png".to_string()));
    assert_eq!(archive.history.len(), 5);
    assert_eq!(&archive.final_snapshot().unwrap().state, engine.state());

    let bytes = archive.to_bytes().unwrap();
    let loaded = Archive::from_bytes(&bytes).unwrap();
    assert_eq!(loaded, archive);
    assert_eq!(Archive::from_json(&archive.to_json().unwrap()).unwrap(), archive);

    let mut restored = sample::engine(EngineConfig::new());
    restored.restore_archive(loaded).unwrap();
    assert_eq!(restored.state(), engine.state());
    assert_eq!(restored.logs(), engine.logs());
    assert_eq!(restored.history().len(), 4);

    // The restored session keeps its undo history
    restored.undo().unwrap();
    assert_eq!(restored.state().zones.hand.len(), 1);
}

#[test]
fn test_restored_session_continues_the_shuffle_stream() {
    let deck = [VALE_WARDEN, VALE_COLOSSUS, VALE_ORACLE, VALE_SENTINEL, VALE_BANNER, VALE_WARD];
    let mut engine = engine_with(EngineConfig::new().with_seed(11), &deck);
    engine.shuffle_deck().unwrap();

    let mut restored = sample::engine(EngineConfig::new().with_seed(99));
    restored.restore_archive(engine.archive(None)).unwrap();

    engine.shuffle_deck().unwrap();
    restored.shuffle_deck().unwrap();
    assert_eq!(restored.state().zones.deck, engine.state().zones.deck);
}

#[test]
fn test_empty_archive_is_rejected() {
    let mut engine = sample::engine(EngineConfig::new());
    let archive = Archive {
        history: Vec::new(),
        logs: Vec::new(),
        cover_image: None,
        rng: None,
    };
    assert!(matches!(engine.restore_archive(archive), Err(DuelError::Archive(_))));
}

#[test]
fn test_store_and_replay_archive() {
    let engine = pendulum_session(EngineConfig::new());
    let mut store = MemoryArchiveStore::new();
    store.save("pendulum", &engine.archive(None)).unwrap();

    assert_eq!(store.names(), vec!["pendulum".to_string()]);
    let archive = store.load("pendulum").unwrap();
    let replay = Replay::from_archive(&archive, engine.config(), 1.0);
    assert_eq!(replay.len(), engine.replay(1.0).len());
    assert!(store.load("other").is_err());
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_from_json() {
    let config = EngineConfig::from_json(r#"{ "replay_base_delay_ms": 500, "log_drag_moves": true }"#).unwrap();
    assert_eq!(config.replay_base_delay_ms, 500);
    assert!(config.log_drag_moves);
    assert_eq!(config.pendulum_cue_ms, 1200);
    assert_eq!(config.max_history, None);

    assert!(matches!(EngineConfig::from_json(r#"{ "seed": "nine" }"#), Err(DuelError::Config(_))));
}
