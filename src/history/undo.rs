//! Checkpoints and undo.

use tracing::debug;

use super::snapshot::Snapshot;
use crate::core::error::DuelError;
use crate::core::rng::GameRng;
use crate::engine::Engine;
use crate::rules::OperationContext;

impl Engine {
    /// Capture the state before a commit, unless the enclosing undo unit
    /// already did.
    pub(crate) fn checkpoint(&mut self, ctx: &OperationContext) {
        if ctx.history_unit {
            return;
        }
        let snapshot = Snapshot::new(self.state.clone(), self.logs.len()).with_rng(self.rng.state());
        self.history.push(snapshot);
        debug!(depth = self.history.len(), log_len = self.logs.len(), "snapshot taken");
    }

    /// True if there is something to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Restore the most recent snapshot.
    ///
    /// The log feed is cut back to the snapshot's marker, the shuffle RNG
    /// rewinds to where it stood and every open or queued request is
    /// closed.
    pub fn undo(&mut self) -> Result<(), DuelError> {
        let Some(snapshot) = self.history.pop() else {
            return Err(self.reject(DuelError::NothingToUndo));
        };
        debug!(depth = self.history.len(), log_len = snapshot.log_len, "undo");
        self.state = snapshot.state;
        if let Some(rng) = &snapshot.rng {
            self.rng = GameRng::from_state(rng);
        }
        self.logs.truncate(snapshot.log_len);
        self.interaction.close_all();
        Ok(())
    }
}
