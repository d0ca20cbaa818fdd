//! Wave: elements along x, displaced on a sine in y.

use serde::{Deserialize, Serialize};

use super::{LayoutBase, LayoutFrame, LayoutStrategy};
use crate::element::AnimatedElement;
use crate::error::AnimationError;
use crate::state::Timing;
use crate::value::Channel;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    pub spacing: f64,
    pub amplitude: f64,
    /// Radians per unit of x.
    pub frequency: f64,
    pub phase: f64,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            spacing: 40.0,
            amplitude: 30.0,
            frequency: 0.05,
            phase: 0.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct WaveLayout {
    pub params: WaveParams,
    base: LayoutBase,
}

impl WaveLayout {
    pub fn new(params: WaveParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for WaveLayout {
    layout_common!("wave");

    fn update(
        &mut self,
        index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let p = &self.params;
        let x = index as f64 * p.spacing;
        let y = p.amplitude * (p.frequency * x + p.phase).sin();
        element.animate_to(Channel::OffsetX, x, frame)?;
        element.animate_to(Channel::OffsetY, y, frame)?;
        Ok(())
    }
}
