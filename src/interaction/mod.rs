//! Player interaction: requests, the pending chain and the modal queue.
//!
//! ## Key Types
//!
//! - `Request`: A question for the player plus its continuation
//! - `Selector`: Declarative description of pickable cards
//! - `Response`: The player's answer
//! - `ChainEntry`: An optional trigger waiting to be ordered
//! - `InteractionQueue`: Open request, FIFO, chain, pending effects
//!
//! At most one request is open at a time. Everything else waits in the
//! queue and is drained by `Engine::settle` once the current operation
//! completes.

pub mod chain;
mod flow;
pub mod queue;
pub mod request;

pub use chain::{eligible, ChainEntry, ChainEntryId, Deferred};
pub use queue::InteractionQueue;
pub use request::{
    Continuation, GroupRule, InteractionPhase, PickCount, Prompt, Request, RequestId, RequestKind, Response,
    Selector,
};
