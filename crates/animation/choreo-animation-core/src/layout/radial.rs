//! Circle and line placements.

use serde::{Deserialize, Serialize};

use super::{polar, LayoutBase, LayoutFrame, LayoutStrategy};
use crate::element::AnimatedElement;
use crate::error::AnimationError;
use crate::state::Timing;
use crate::value::Channel;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleParams {
    /// Ring radius; 0 uses half the smaller container dimension.
    pub radius: f64,
    /// Degrees of the first element.
    pub start_angle: f64,
    /// Rotate each element to face outwards.
    pub rotate: bool,
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            radius: 0.0,
            start_angle: -90.0,
            rotate: false,
        }
    }
}

/// Elements evenly spaced on a ring about the container center.
#[derive(Clone, Debug)]
pub struct CircleLayout {
    pub params: CircleParams,
    base: LayoutBase,
}

impl CircleLayout {
    pub fn new(params: CircleParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for CircleLayout {
    layout_common!("circle");

    fn update(
        &mut self,
        index: usize,
        count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let (cx, cy) = frame.center();
        let radius = if self.params.radius > 0.0 {
            self.params.radius
        } else {
            frame.width.min(frame.height) / 2.0
        };
        let angle = self.params.start_angle + 360.0 * index as f64 / count.max(1) as f64;
        let (x, y) = polar(cx, cy, radius, angle);
        element.animate_to(Channel::OffsetX, x, frame)?;
        element.animate_to(Channel::OffsetY, y, frame)?;
        if self.params.rotate {
            element.animate_to(Channel::Rotation, angle, frame)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineParams {
    pub origin_x: f64,
    pub origin_y: f64,
    pub spacing: f64,
    /// Direction of the line in degrees (0 = along +x).
    pub angle: f64,
}

impl Default for LineParams {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            spacing: 50.0,
            angle: 0.0,
        }
    }
}

/// Elements in a straight row along a direction.
#[derive(Clone, Debug)]
pub struct LineLayout {
    pub params: LineParams,
    base: LayoutBase,
}

impl LineLayout {
    pub fn new(params: LineParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for LineLayout {
    layout_common!("line");

    fn update(
        &mut self,
        index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let p = &self.params;
        let (x, y) = polar(p.origin_x, p.origin_y, index as f64 * p.spacing, p.angle);
        element.animate_to(Channel::OffsetX, x, frame)?;
        element.animate_to(Channel::OffsetY, y, frame)?;
        Ok(())
    }
}
