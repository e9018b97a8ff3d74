//! Instance identification.
//!
//! Every physical copy of a card on the board has a unique `InstanceId`.
//! The shared card definition it was printed from is identified separately
//! by `CardId` (see `cards::definition`).
//!
//! ## ID Layout
//!
//! IDs are allocated sequentially starting at 1, in deck-list order at
//! initialization. Copies added later continue the sequence. An ID is never
//! reused within a duel, even after the instance is removed.
//!
//! ```
//! use solo_duel::core::InstanceId;
//!
//! let first = InstanceId::FIRST;
//! assert_eq!(first.raw(), 1);
//! assert_eq!(first.next(), InstanceId::new(2));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// The first ID handed out in a duel.
    pub const FIRST: Self = Self(1);

    /// Create an instance ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}
