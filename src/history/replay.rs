//! Replay of a recorded session.
//!
//! A replay is a list of frames built from the snapshot history, oldest
//! first, with the live state as the last frame. Each frame carries the
//! number of log lines visible at that point and how long to hold it.
//! When the Pendulum Summon counter goes up between two frames, a cue
//! frame of fixed length is inserted before the new board.
//!
//! Playback sleeps between frames and checks a shared stop flag once per
//! step, so another thread can interrupt it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::archive::Archive;
use super::snapshot::Snapshot;
use crate::core::config::EngineConfig;
use crate::core::state::DuelState;
use crate::engine::Engine;

/// What a frame shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameKind {
    Board,
    /// The Pendulum Summon animation, shown over the previous board.
    PendulumCue,
}

/// One replay step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayFrame {
    pub kind: FrameKind,
    pub state: DuelState,
    /// Log lines visible in this frame.
    pub log_len: usize,
    /// How long the frame is held.
    pub delay: Duration,
}

/// A replay ready to play.
#[derive(Debug)]
pub struct Replay {
    frames: Vec<ReplayFrame>,
    logs: Vec<String>,
    stop: Arc<AtomicBool>,
}

impl Replay {
    /// Build frames from snapshots (oldest first).
    #[must_use]
    pub fn new(snapshots: Vec<Snapshot>, logs: Vec<String>, config: &EngineConfig, speed: f64) -> Self {
        let step = config.replay_delay(speed);
        let cue = config.pendulum_cue();
        let mut frames: Vec<ReplayFrame> = Vec::with_capacity(snapshots.len());
        let mut previous: Option<(DuelState, usize)> = None;

        for snapshot in snapshots {
            let log_len = snapshot.log_len.min(logs.len());
            if let Some((before, before_len)) = previous.take() {
                if snapshot.state.pendulum_summon_count > before.pendulum_summon_count {
                    frames.push(ReplayFrame {
                        kind: FrameKind::PendulumCue,
                        state: before,
                        log_len: before_len,
                        delay: cue,
                    });
                }
            }
            previous = Some((snapshot.state.clone(), log_len));
            frames.push(ReplayFrame {
                kind: FrameKind::Board,
                state: snapshot.state,
                log_len,
                delay: step,
            });
        }

        debug!(frames = frames.len(), ?step, "replay built");
        Self {
            frames,
            logs,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Replay a saved archive. Its last snapshot is the final board.
    #[must_use]
    pub fn from_archive(archive: &Archive, config: &EngineConfig, speed: f64) -> Self {
        Self::new(archive.history.clone(), archive.logs.clone(), config, speed)
    }

    #[must_use]
    pub fn frames(&self) -> &[ReplayFrame] {
        &self.frames
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Log lines visible in a frame.
    #[must_use]
    pub fn visible_logs(&self, frame: &ReplayFrame) -> &[String] {
        &self.logs[..frame.log_len.min(self.logs.len())]
    }

    /// Handle for stopping playback from elsewhere.
    #[must_use]
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Show every frame, holding each for its delay.
    ///
    /// Returns the number of frames shown before the end or a stop.
    pub fn play(&self, mut show: impl FnMut(&ReplayFrame, &[String])) -> usize {
        let mut shown = 0;
        for frame in &self.frames {
            if self.stop.load(Ordering::Relaxed) {
                debug!(shown, "replay stopped");
                break;
            }
            show(frame, self.visible_logs(frame));
            shown += 1;
            if !frame.delay.is_zero() {
                std::thread::sleep(frame.delay);
            }
        }
        shown
    }
}

impl Engine {
    /// Build a replay of this session, ending on the live board.
    #[must_use]
    pub fn replay(&self, speed: f64) -> Replay {
        let mut snapshots = self.history.snapshots().to_vec();
        snapshots.push(Snapshot::new(self.state.clone(), self.logs.len()));
        Replay::new(snapshots, self.logs.clone(), &self.config, speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pendulum_summons: u32, log_len: usize) -> Snapshot {
        let mut state = DuelState::new();
        state.pendulum_summon_count = pendulum_summons;
        Snapshot::new(state, log_len)
    }

    fn logs(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("line {i}")).collect()
    }

    #[test]
    fn test_frames_and_delays() {
        let config = EngineConfig::new();
        let replay = Replay::new(vec![snapshot(0, 0), snapshot(0, 1), snapshot(0, 2)], logs(2), &config, 2.0);

        assert_eq!(replay.len(), 3);
        assert!(replay.frames().iter().all(|f| f.delay == Duration::from_millis(500)));
        assert_eq!(replay.visible_logs(&replay.frames()[2]).len(), 2);
        assert!(replay.visible_logs(&replay.frames()[0]).is_empty());
    }

    #[test]
    fn test_pendulum_cue_inserted() {
        let config = EngineConfig::new();
        let replay = Replay::new(vec![snapshot(0, 0), snapshot(1, 1), snapshot(1, 2)], logs(2), &config, 1.0);

        let kinds: Vec<FrameKind> = replay.frames().iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![FrameKind::Board, FrameKind::PendulumCue, FrameKind::Board, FrameKind::Board]
        );
        let cue = &replay.frames()[1];
        assert_eq!(cue.delay, config.pendulum_cue());
        assert_eq!(cue.state.pendulum_summon_count, 0);
    }

    #[test]
    fn test_stop_flag() {
        let config = EngineConfig::new().with_replay_delay(0);
        let replay = Replay::new(vec![snapshot(0, 0), snapshot(0, 0), snapshot(0, 0)], Vec::new(), &config, 1.0);
        let stop = replay.stop_handle();

        let shown = replay.play(|_, _| stop.store(true, Ordering::Relaxed));
        assert_eq!(shown, 1);
    }
}
