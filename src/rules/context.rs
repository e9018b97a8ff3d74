//! Operation context and summon variants.
//!
//! Nested operations (materials sent during a summon, tributes, cascaded
//! detachments) need to run quietly or as part of a larger undo step. The
//! `OperationContext` carries those switches down the call chain instead
//! of parking them in engine-wide flags.

use serde::{Deserialize, Serialize};

/// How a monster was Special Summoned from the Extra Deck or by scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SummonVariant {
    Fusion,
    Synchro,
    Xyz,
    Link,
    Pendulum,
}

impl SummonVariant {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SummonVariant::Fusion => "Fusion",
            SummonVariant::Synchro => "Synchro",
            SummonVariant::Xyz => "Xyz",
            SummonVariant::Link => "Link",
            SummonVariant::Pendulum => "Pendulum",
        }
    }
}

impl std::fmt::Display for SummonVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Switches for one operation and everything it calls.
///
/// ```
/// use solo_duel::rules::OperationContext;
///
/// let top = OperationContext::default();
/// let inner = top.within_unit().quiet();
/// assert!(!top.history_unit);
/// assert!(inner.history_unit && inner.suppress_log);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperationContext {
    /// Do not write a log line for this move.
    pub suppress_log: bool,
    /// Do not dispatch effect handlers after this move.
    pub suppress_triggers: bool,
    /// A snapshot for the enclosing undo step was already taken.
    pub history_unit: bool,
    /// The card is a material being detached; disables the Pendulum
    /// redirect to the Extra Deck.
    pub material_move: bool,
    /// The card is used as a material (dispatch reason).
    pub as_material: bool,
    /// Part of a drag gesture on the board.
    pub drag: bool,
}

impl OperationContext {
    /// Context for an inner step of an undo unit that already captured a
    /// snapshot.
    #[must_use]
    pub fn within_unit(self) -> Self {
        Self {
            history_unit: true,
            ..self
        }
    }

    #[must_use]
    pub fn quiet(self) -> Self {
        Self {
            suppress_log: true,
            ..self
        }
    }

    #[must_use]
    pub fn without_triggers(self) -> Self {
        Self {
            suppress_triggers: true,
            ..self
        }
    }

    /// Detachment of an attached material.
    #[must_use]
    pub fn detaching(self) -> Self {
        Self {
            material_move: true,
            as_material: true,
            ..self
        }
    }

    /// Sent away as a summoning material.
    #[must_use]
    pub fn as_material(self) -> Self {
        Self {
            as_material: true,
            ..self
        }
    }

    #[must_use]
    pub fn dragging(self, drag: bool) -> Self {
        Self { drag, ..self }
    }
}
