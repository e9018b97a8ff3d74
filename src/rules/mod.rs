//! Duel rules: placement, redirects, the move engine and log lines.
//!
//! Every zone mutation goes through `Engine::move_card` (or one of the
//! summon procedures built on top of it), which validates the destination,
//! takes a history snapshot, applies redirects and cascades, writes one log
//! line and offers the involved cards' effects.

pub mod context;
pub mod messages;
pub mod movement;
pub mod placement;

pub use context::{OperationContext, SummonVariant};
pub use messages::{summon_line, MoveLine};
pub use movement::{MoveRequest, Moved};
pub use placement::{
    board_without, check_slot, extra_summon_slots, first_legal_slot, linked_zones, pendulum_slots, redirect,
    tributes_required, Redirect,
};
