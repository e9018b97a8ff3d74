//! Special Summon procedures.
//!
//! Each procedure is a short sequence of requests (materials, then a
//! zone) ending in a single commit. Nothing on the board changes until the
//! last choice is made, so cancelling at any step leaves the duel as it
//! was.
//!
//! ## Procedures
//!
//! - `Engine::fusion_summon`: recipe of per-slot filters
//! - `Engine::synchro_summon`: one Tuner plus one non-Tuner
//! - `Engine::xyz_summon`: two or more monsters of the rank's level,
//!   attached as materials
//! - `Engine::link_summon`: material points equal to the Link rating
//! - `Engine::pendulum_summon`: any number of monsters between the scales

mod extra;
pub mod fusion;
mod link;
pub mod materials;
pub mod pendulum;
mod synchro;
mod xyz;

pub use fusion::fusion_targets;
pub use pendulum::{pendulum_candidates, pendulum_scales};
