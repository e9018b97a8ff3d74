//! History: undo, jump-to-log, replay and archives.
//!
//! ## Key Types
//!
//! - `Snapshot`: State plus log marker, taken before each commit
//! - `History`: The undo stack and the jump stack
//! - `Replay`: Timed frames built from the history
//! - `Archive`: A saved session, with `ArchiveStore` for persistence

pub mod archive;
mod jump;
pub mod replay;
pub mod snapshot;
mod undo;

pub use archive::{Archive, ArchiveStore, MemoryArchiveStore};
pub use replay::{FrameKind, Replay, ReplayFrame};
pub use snapshot::{History, Snapshot};
