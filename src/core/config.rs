//! Engine configuration.
//!
//! Hosts configure the engine at startup with an `EngineConfig`. Every
//! field has a default, so a partial JSON document is enough:
//!
//! ```
//! use solo_duel::core::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "seed": 9, "max_history": 50 }"#).unwrap();
//! assert_eq!(config.seed, 9);
//! assert_eq!(config.max_history, Some(50));
//! assert_eq!(config.replay_base_delay_ms, 1000);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::DuelError;

/// Configuration for a duel engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for deck shuffles.
    pub seed: u64,

    /// Delay between replay frames at speed 1.0.
    pub replay_base_delay_ms: u64,

    /// Length of the visual cue shown before a Pendulum Summon is revealed
    /// during replay.
    pub pendulum_cue_ms: u64,

    /// Maximum number of snapshots kept for undo. `None` keeps everything.
    pub max_history: Option<usize>,

    /// Log field-to-field moves made by a drag gesture.
    pub log_drag_moves: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            replay_base_delay_ms: 1000,
            pendulum_cue_ms: 1200,
            max_history: None,
            log_drag_moves: false,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, DuelError> {
        serde_json::from_str(json).map_err(|e| DuelError::Config(e.to_string()))
    }

    /// Set the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Cap the undo history.
    #[must_use]
    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = Some(max);
        self
    }

    /// Set the base replay delay.
    #[must_use]
    pub fn with_replay_delay(mut self, millis: u64) -> Self {
        self.replay_base_delay_ms = millis;
        self
    }

    /// Set the Pendulum Summon cue length.
    #[must_use]
    pub fn with_pendulum_cue(mut self, millis: u64) -> Self {
        self.pendulum_cue_ms = millis;
        self
    }

    /// Log drag moves that stay on the field.
    #[must_use]
    pub fn logging_drag_moves(mut self) -> Self {
        self.log_drag_moves = true;
        self
    }

    /// Delay between replay frames for a speed multiplier.
    ///
    /// Non-positive or non-finite speeds fall back to 1.0.
    #[must_use]
    pub fn replay_delay(&self, speed: f64) -> Duration {
        let speed = if speed.is_finite() && speed > 0.0 { speed } else { 1.0 };
        Duration::from_secs_f64(self.replay_base_delay_ms as f64 / 1000.0 / speed)
    }

    /// Length of the Pendulum Summon cue.
    #[must_use]
    pub fn pendulum_cue(&self) -> Duration {
        Duration::from_millis(self.pendulum_cue_ms)
    }
}
