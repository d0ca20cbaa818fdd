//! Pulse: time-based scale oscillation between `base_scale` and
//! `base_scale + pulse_scale`.
//!
//! Each application looks at how many layout durations have passed since the
//! strategy's origin: even half-cycles grow, odd half-cycles shrink back.

use serde::{Deserialize, Serialize};

use super::{LayoutBase, LayoutFrame, LayoutStrategy};
use crate::element::AnimatedElement;
use crate::error::AnimationError;
use crate::state::Timing;
use crate::value::Channel;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseParams {
    pub base_scale: f64,
    pub pulse_scale: f64,
}

impl Default for PulseParams {
    fn default() -> Self {
        Self {
            base_scale: 1.0,
            pulse_scale: 0.1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PulseLayout {
    pub params: PulseParams,
    base: LayoutBase,
}

impl PulseLayout {
    pub fn new(params: PulseParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }

    /// Target scale for an application at `frame.now`.
    pub fn target(&self, frame: &LayoutFrame) -> f64 {
        let duration = frame.timing.duration_ms;
        let half_cycle = if duration > 0.0 {
            (frame.now.elapsed_since(frame.origin) / duration).floor() as u64
        } else {
            0
        };
        if half_cycle % 2 == 0 {
            self.params.base_scale + self.params.pulse_scale
        } else {
            self.params.base_scale
        }
    }
}

impl LayoutStrategy for PulseLayout {
    layout_common!("pulse");

    fn update(
        &mut self,
        _index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let scale = self.target(frame);
        element.animate_to(Channel::ScaleX, scale, frame)?;
        element.animate_to(Channel::ScaleY, scale, frame)?;
        Ok(())
    }
}
