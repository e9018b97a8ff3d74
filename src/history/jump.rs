//! Jumping to an earlier log line and back.
//!
//! A jump cuts the undo stack at the chosen point and pushes the present
//! (undo stack, live state, log feed and RNG position) onto a jump stack so
//! the player can return to it. Jumps nest.

use tracing::debug;

use super::snapshot::JumpFrame;
use crate::core::error::DuelError;
use crate::core::rng::GameRng;
use crate::engine::Engine;

impl Engine {
    /// Show the board as it was right after log line `index` (0-based).
    pub fn jump_to_log(&mut self, index: usize) -> Result<(), DuelError> {
        let marker = index + 1;
        let Some(at) = self.history.find_marker(marker) else {
            return Err(self.reject(DuelError::NoSnapshotForLogLine(index)));
        };

        let Some(target) = self.history.snapshots().get(at).cloned() else {
            return Err(self.reject(DuelError::NoSnapshotForLogLine(index)));
        };
        let saved = self.history.split_off(at);
        let live = std::mem::replace(&mut self.state, target.state);
        let logs = self.logs.clone();
        let rng = self.rng.state();
        if let Some(past) = &target.rng {
            self.rng = GameRng::from_state(past);
        }
        self.history.push_jump(JumpFrame {
            saved,
            live,
            logs,
            rng,
        });
        self.logs.truncate(marker);
        self.interaction.close_all();
        debug!(index, depth = self.history.jump_depth(), "jumped to log line");
        Ok(())
    }

    /// Return from the most recent jump. Changes made meanwhile are
    /// discarded.
    pub fn return_from_jump(&mut self) -> Result<(), DuelError> {
        let Some(frame) = self.history.pop_jump() else {
            return Err(self.reject(DuelError::NotJumped));
        };
        self.history.restore(frame.saved);
        self.state = frame.live;
        self.logs = frame.logs;
        self.rng = GameRng::from_state(&frame.rng);
        self.interaction.close_all();
        debug!(depth = self.history.jump_depth(), "returned from jump");
        Ok(())
    }

    /// True while viewing a jumped state.
    #[must_use]
    pub fn is_jumped(&self) -> bool {
        self.history.jump_depth() > 0
    }
}
