//! Core configuration for choreo-animation-core.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::interp::Easing;
use crate::state::Timing;

/// What `register` does with an id that is already registered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the existing element and return its key.
    #[default]
    Collapse,
    /// Fail with `DuplicateId`.
    Reject,
}

/// Engine defaults. Keep this small; strategies carry their own parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub default_duration_ms: f64,
    pub default_easing: Easing,
    /// Floor for playback speed multipliers.
    pub min_speed: f64,
    pub duplicate_policy: DuplicatePolicy,
    /// Cap on laid-out elements, inherited by groups without their own.
    pub max_displayed_items: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_ms: 500.0,
            default_easing: Easing::default(),
            min_speed: 0.01,
            duplicate_policy: DuplicatePolicy::Collapse,
            max_displayed_items: None,
        }
    }
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self, AnimationError> {
        let cfg: Config = serde_json::from_str(json)?;
        if !(cfg.min_speed.is_finite() && cfg.min_speed > 0.0) {
            return Err(AnimationError::invalid(format!(
                "min_speed must be positive, got {}",
                cfg.min_speed
            )));
        }
        Ok(cfg)
    }

    /// Timing handed to strategies built from this config.
    pub fn default_timing(&self) -> Timing {
        Timing::new(self.default_duration_ms, self.default_easing).unwrap_or_default()
    }
}
