//! Input contracts for the playback controller.
//!
//! Hosts translate UI actions into [`PlaybackCommand`]s and hand them to
//! `PlaybackController::apply` together with the current instant.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    #[default]
    Once,
    /// Play the timeline this many additional times.
    Count(u32),
    Infinite,
}

impl LoopMode {
    /// Loops left at start; `None` when unbounded.
    #[inline]
    pub fn initial_remaining(&self) -> Option<u32> {
        match self {
            Self::Once => Some(0),
            Self::Count(n) => Some(*n),
            Self::Infinite => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlaybackCommand {
    Start {
        duration_ms: f64,
        #[serde(default)]
        loop_mode: LoopMode,
        #[serde(default = "default_speed")]
        speed: f64,
    },
    Pause,
    Resume,
    Stop {
        #[serde(default)]
        reset: bool,
    },
    SetDuration {
        duration_ms: f64,
    },
    SetSpeed {
        speed: f64,
    },
    SetLoop {
        loop_mode: LoopMode,
    },
}

fn default_speed() -> f64 {
    1.0
}
