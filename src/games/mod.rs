//! Card pools built on the engine.
//!
//! - `sample`: a small "Vale"/"Ember" pool that exercises every summon
//!   procedure and effect pattern the engine supports

pub mod sample;
