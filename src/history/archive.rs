//! Saved sessions.
//!
//! An `Archive` is everything needed to replay or continue a session later:
//! the snapshot history (ending on the final board), the log feed, the
//! shuffle RNG position and an optional cover image. It serializes to JSON for hosts and to a compact
//! `bincode` encoding for storage.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::snapshot::Snapshot;
use crate::core::error::DuelError;
use crate::core::rng::{GameRng, GameRngState};
use crate::engine::Engine;

/// A saved session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    pub history: Vec<Snapshot>,
    pub logs: Vec<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    /// Where the shuffle stream stood. Absent in archives from hosts that
    /// do not record it; the engine then keeps its own RNG.
    #[serde(default)]
    pub rng: Option<GameRngState>,
}

impl Archive {
    pub fn to_bytes(&self) -> Result<Vec<u8>, DuelError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DuelError> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn to_json(&self) -> Result<String, DuelError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, DuelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The final board, if the archive has any snapshot.
    #[must_use]
    pub fn final_snapshot(&self) -> Option<&Snapshot> {
        self.history.last()
    }
}

/// Persistence collaborator for archives.
pub trait ArchiveStore {
    fn save(&mut self, name: &str, archive: &Archive) -> Result<(), DuelError>;

    fn load(&self, name: &str) -> Result<Archive, DuelError>;

    /// Names of stored archives, sorted.
    fn names(&self) -> Vec<String>;
}

/// Archive store kept in memory as `bincode` bytes.
#[derive(Clone, Debug, Default)]
pub struct MemoryArchiveStore {
    entries: FxHashMap<String, Vec<u8>>,
}

impl MemoryArchiveStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArchiveStore for MemoryArchiveStore {
    fn save(&mut self, name: &str, archive: &Archive) -> Result<(), DuelError> {
        let bytes = archive.to_bytes()?;
        debug!(name, bytes = bytes.len(), "archive saved");
        self.entries.insert(name.to_string(), bytes);
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Archive, DuelError> {
        let bytes = self
            .entries
            .get(name)
            .ok_or_else(|| DuelError::Archive(format!("no archive named {name}")))?;
        Archive::from_bytes(bytes)
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Engine {
    /// Archive the session. The live board is appended as the final
    /// snapshot.
    #[must_use]
    pub fn archive(&self, cover_image: Option<String>) -> Archive {
        let mut history = self.history.snapshots().to_vec();
        history.push(Snapshot::new(self.state.clone(), self.logs.len()));
        Archive {
            history,
            logs: self.logs.clone(),
            cover_image,
            rng: Some(self.rng.state()),
        }
    }

    /// Continue a saved session: the final snapshot becomes the live board
    /// and the rest becomes the undo history.
    pub fn restore_archive(&mut self, archive: Archive) -> Result<(), DuelError> {
        let mut history = archive.history;
        let Some(last) = history.pop() else {
            return Err(self.reject(DuelError::Archive("the archive has no snapshots".to_string())));
        };
        self.history.replace(history);
        self.state = last.state;
        self.logs = archive.logs;
        if let Some(rng) = &archive.rng {
            self.rng = GameRng::from_state(rng);
        }
        self.interaction.close_all();
        info!(history = self.history.len(), logs = self.logs.len(), "archive restored");
        Ok(())
    }
}
