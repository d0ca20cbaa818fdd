//! Fan: elements spread over an arc centered on 0 degrees, each rotated to
//! its angle.

use serde::{Deserialize, Serialize};

use super::{polar, LayoutBase, LayoutFrame, LayoutStrategy};
use crate::element::AnimatedElement;
use crate::error::AnimationError;
use crate::state::Timing;
use crate::value::Channel;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanParams {
    pub radius: f64,
    /// Total arc in degrees.
    pub angle_spread: f64,
}

impl Default for FanParams {
    fn default() -> Self {
        Self {
            radius: 200.0,
            angle_spread: 60.0,
        }
    }
}

impl FanParams {
    /// Angle in degrees of element `index` out of `count`.
    pub fn angle(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return 0.0;
        }
        -self.angle_spread / 2.0 + index as f64 * self.angle_spread / (count - 1) as f64
    }
}

#[derive(Clone, Debug)]
pub struct FanLayout {
    pub params: FanParams,
    base: LayoutBase,
}

impl FanLayout {
    pub fn new(params: FanParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for FanLayout {
    layout_common!("fan");

    fn update(
        &mut self,
        index: usize,
        count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let angle = self.params.angle(index, count);
        let (x, y) = polar(0.0, 0.0, self.params.radius, angle);
        element.animate_to(Channel::OffsetX, x, frame)?;
        element.animate_to(Channel::OffsetY, y, frame)?;
        element.animate_to(Channel::Rotation, angle, frame)?;
        Ok(())
    }
}
