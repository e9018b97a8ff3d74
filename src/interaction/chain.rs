//! Pending-chain entries.
//!
//! While an operation is batching, optional triggered effects are not
//! shown to the player right away. Each one becomes a `ChainEntry` and the
//! player picks the activation order once the operation completes.
//!
//! ## Fixed priority
//!
//! Some card pairs always resolve in a set order. When both are pending,
//! the junior entry is withheld from the choice until the senior one has
//! gone.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::entity::InstanceId;
use crate::core::error::DuelError;
use crate::engine::Engine;

/// Identifier of a chain entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainEntryId(pub u32);

impl fmt::Display for ChainEntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chain({})", self.0)
    }
}

/// Deferred code run by the queue.
pub type Deferred = Box<dyn FnOnce(&mut Engine) -> Result<(), DuelError>>;

/// One optional trigger waiting for the player to order it.
pub struct ChainEntry {
    pub id: ChainEntryId,
    /// Label shown in the ordering prompt.
    pub label: String,
    pub source: InstanceId,
    pub card: CardId,
    pub(crate) execute: Deferred,
}

impl ChainEntry {
    pub fn new(
        label: impl Into<String>,
        source: InstanceId,
        card: CardId,
        execute: impl FnOnce(&mut Engine) -> Result<(), DuelError> + 'static,
    ) -> Self {
        Self {
            id: ChainEntryId(0),
            label: label.into(),
            source,
            card,
            execute: Box::new(execute),
        }
    }
}

impl fmt::Debug for ChainEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainEntry")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("source", &self.source)
            .field("card", &self.card)
            .finish_non_exhaustive()
    }
}

/// Indices of the entries the player may pick now.
///
/// `priorities` holds `(senior, junior)` card pairs.
#[must_use]
pub fn eligible(entries: &[ChainEntry], priorities: &[(CardId, CardId)]) -> Vec<usize> {
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| {
            !priorities.iter().any(|(senior, junior)| {
                entry.card == *junior && entries.iter().any(|other| other.card == *senior)
            })
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(card: u32) -> ChainEntry {
        ChainEntry::new(format!("card {card}"), InstanceId(card), CardId::new(card), |_| Ok(()))
    }

    #[test]
    fn test_all_eligible_without_priorities() {
        let entries = vec![entry(1), entry(2), entry(3)];
        assert_eq!(eligible(&entries, &[]), vec![0, 1, 2]);
    }

    #[test]
    fn test_junior_withheld_while_senior_pending() {
        let priorities = [(CardId::new(2), CardId::new(1))];

        let entries = vec![entry(1), entry(2), entry(3)];
        assert_eq!(eligible(&entries, &priorities), vec![1, 2]);

        let entries = vec![entry(1), entry(3)];
        assert_eq!(eligible(&entries, &priorities), vec![0, 1]);
    }
}
