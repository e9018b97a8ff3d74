//! Snapshots and the undo stack.
//!
//! A `Snapshot` pairs a copy of the duel state with the length of the log
//! feed and the shuffle RNG position at the moment it was taken. Because
//! `DuelState` is built on `im` collections, the copy shares structure with
//! the live state and costs O(1) to take.

use serde::{Deserialize, Serialize};

use crate::core::rng::GameRngState;
use crate::core::state::DuelState;

/// The state just before a committed mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: DuelState,
    /// Number of log lines written when the snapshot was taken.
    pub log_len: usize,
    /// Shuffle stream position. Restored by undo so a repeated shuffle
    /// gives the same order.
    #[serde(default)]
    pub rng: Option<GameRngState>,
}

impl Snapshot {
    #[must_use]
    pub fn new(state: DuelState, log_len: usize) -> Self {
        Self { state, log_len, rng: None }
    }

    #[must_use]
    pub fn with_rng(mut self, rng: GameRngState) -> Self {
        self.rng = Some(rng);
        self
    }
}

/// Saved "present" while the player looks at an earlier point.
#[derive(Clone, Debug)]
pub(crate) struct JumpFrame {
    /// The whole undo stack at the moment of the jump.
    pub saved: Vec<Snapshot>,
    pub live: DuelState,
    pub logs: Vec<String>,
    pub rng: GameRngState,
}

/// Undo stack plus the stack of active jumps.
#[derive(Clone, Debug, Default)]
pub struct History {
    snapshots: Vec<Snapshot>,
    jumps: Vec<JumpFrame>,
    max: Option<usize>,
}

impl History {
    /// Create an empty history keeping at most `max` snapshots.
    #[must_use]
    pub fn new(max: Option<usize>) -> Self {
        Self {
            snapshots: Vec::new(),
            jumps: Vec::new(),
            max,
        }
    }

    #[must_use]
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Push a snapshot, dropping the oldest past the cap.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
        if let Some(max) = self.max {
            if self.snapshots.len() > max {
                let excess = self.snapshots.len() - max;
                self.snapshots.drain(..excess);
            }
        }
    }

    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    /// Index of the first snapshot whose log marker is `log_len`.
    #[must_use]
    pub fn find_marker(&self, log_len: usize) -> Option<usize> {
        self.snapshots.iter().position(|s| s.log_len == log_len)
    }

    /// Cut the history at `at`, returning the full stack as it was.
    pub(crate) fn split_off(&mut self, at: usize) -> Vec<Snapshot> {
        let saved = self.snapshots.clone();
        self.snapshots.truncate(at);
        saved
    }

    pub(crate) fn push_jump(&mut self, frame: JumpFrame) {
        self.jumps.push(frame);
    }

    pub(crate) fn pop_jump(&mut self) -> Option<JumpFrame> {
        self.jumps.pop()
    }

    /// Put back the stack saved by a jump.
    pub(crate) fn restore(&mut self, saved: Vec<Snapshot>) {
        self.snapshots = saved;
    }

    /// Number of nested jumps.
    #[must_use]
    pub fn jump_depth(&self) -> usize {
        self.jumps.len()
    }

    /// Replace the whole stack (loading an archive).
    pub(crate) fn replace(&mut self, snapshots: Vec<Snapshot>) {
        self.snapshots = snapshots;
        self.jumps.clear();
    }
}
