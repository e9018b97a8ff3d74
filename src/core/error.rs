//! Engine error type.
//!
//! Every rejected action returns one of these and leaves the duel state
//! untouched. The engine also writes the error's `Display` text to the log
//! feed, which is the only thing the player ever sees of it.

use thiserror::Error;

use crate::cards::CardId;
use crate::core::entity::InstanceId;
use crate::interaction::RequestId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DuelError {
    /// Destination violates a type or capacity rule.
    #[error("illegal placement: {0}")]
    IllegalPlacement(String),
    /// An effect's required condition does not hold.
    #[error("cannot activate: {0}")]
    MissingPrecondition(String),
    /// A once-per-turn effect was already used.
    #[error("{0} was already used this turn")]
    UsageExhausted(String),
    /// An instance is not where a previous step expected it to be.
    #[error("{0} is no longer where it was expected")]
    StaleReference(InstanceId),
    #[error("unknown card id {0}")]
    UnknownCard(CardId),
    #[error("unknown instance {0}")]
    UnknownInstance(InstanceId),
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("no snapshot recorded for log line {0}")]
    NoSnapshotForLogLine(usize),
    #[error("not viewing a jumped state")]
    NotJumped,
    #[error("no open request")]
    NoOpenRequest,
    #[error("request {0} is not the open request")]
    RequestMismatch(RequestId),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("archive error: {0}")]
    Archive(String),
}

impl From<bincode::Error> for DuelError {
    fn from(value: bincode::Error) -> Self {
        Self::Archive(value.to_string())
    }
}

impl From<serde_json::Error> for DuelError {
    fn from(value: serde_json::Error) -> Self {
        Self::Archive(value.to_string())
    }
}
