//! Closed-form curve placements over `index / count`.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use super::{polar, LayoutBase, LayoutFrame, LayoutStrategy};
use crate::element::AnimatedElement;
use crate::error::AnimationError;
use crate::state::Timing;
use crate::value::Channel;

#[inline]
fn turn(index: usize, count: usize) -> f64 {
    TAU * index as f64 / count.max(1) as f64
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeartParams {
    /// Multiplier on the unit heart curve (about 32 units wide).
    pub size: f64,
}

impl Default for HeartParams {
    fn default() -> Self {
        Self { size: 8.0 }
    }
}

/// Heart curve: x = 16 sin^3 t, y = -(13 cos t - 5 cos 2t - 2 cos 3t - cos 4t).
#[derive(Clone, Debug)]
pub struct HeartLayout {
    pub params: HeartParams,
    base: LayoutBase,
}

impl HeartLayout {
    pub fn new(params: HeartParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }

    /// Offset of the curve point at parameter `t` from the center.
    pub fn point(&self, t: f64) -> (f64, f64) {
        let s = self.params.size;
        let x = 16.0 * t.sin().powi(3);
        let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
        (s * x, s * y)
    }
}

impl LayoutStrategy for HeartLayout {
    layout_common!("heart");

    fn update(
        &mut self,
        index: usize,
        count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let (cx, cy) = frame.center();
        let (dx, dy) = self.point(turn(index, count));
        element.animate_to(Channel::OffsetX, cx + dx, frame)?;
        element.animate_to(Channel::OffsetY, cy + dy, frame)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowerParams {
    pub radius: f64,
    pub petals: u32,
}

impl Default for FlowerParams {
    fn default() -> Self {
        Self {
            radius: 150.0,
            petals: 5,
        }
    }
}

/// Rose curve r = radius * |cos(petals * theta)|.
#[derive(Clone, Debug)]
pub struct FlowerLayout {
    pub params: FlowerParams,
    base: LayoutBase,
}

impl FlowerLayout {
    pub fn new(params: FlowerParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for FlowerLayout {
    layout_common!("flower");

    fn update(
        &mut self,
        index: usize,
        count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let (cx, cy) = frame.center();
        let theta = turn(index, count);
        let r = self.params.radius * (self.params.petals as f64 * theta).cos().abs();
        let angle = theta.to_degrees();
        let (x, y) = polar(cx, cy, r, angle);
        element.animate_to(Channel::OffsetX, x, frame)?;
        element.animate_to(Channel::OffsetY, y, frame)?;
        element.animate_to(Channel::Rotation, angle, frame)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunburstParams {
    pub inner_radius: f64,
    pub ring_spacing: f64,
    /// Elements per ring.
    pub rays: usize,
}

impl Default for SunburstParams {
    fn default() -> Self {
        Self {
            inner_radius: 40.0,
            ring_spacing: 40.0,
            rays: 12,
        }
    }
}

/// Concentric rings of rays; odd rings are offset by half a ray.
#[derive(Clone, Debug)]
pub struct SunburstLayout {
    pub params: SunburstParams,
    base: LayoutBase,
}

impl SunburstLayout {
    pub fn new(params: SunburstParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for SunburstLayout {
    layout_common!("sunburst");

    fn update(
        &mut self,
        index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let p = &self.params;
        if p.rays == 0 {
            return Err(AnimationError::invalid("sunburst needs at least one ray"));
        }
        let ring = index / p.rays;
        let ray = index % p.rays;
        let step = 360.0 / p.rays as f64;
        let stagger = if ring % 2 == 1 { step / 2.0 } else { 0.0 };
        let angle = ray as f64 * step + stagger;
        let radius = p.inner_radius + ring as f64 * p.ring_spacing;
        let (cx, cy) = frame.center();
        let (x, y) = polar(cx, cy, radius, angle);
        element.animate_to(Channel::OffsetX, x, frame)?;
        element.animate_to(Channel::OffsetY, y, frame)?;
        element.animate_to(Channel::Rotation, angle, frame)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::{linear_timing, run};
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn heart_bottom_and_top() {
        let layout = HeartLayout::new(HeartParams { size: 1.0 }, linear_timing(0.0));
        // t = 0 is the notch at the top, t = pi the tip at the bottom.
        let (x0, y0) = layout.point(0.0);
        assert_relative_eq!(x0, 0.0);
        assert_relative_eq!(y0, -5.0);
        let (x1, y1) = layout.point(PI);
        assert_relative_eq!(x1, 0.0, epsilon = 1e-9);
        assert_relative_eq!(y1, 17.0, epsilon = 1e-9);
    }

    #[test]
    fn sunburst_rings() {
        let mut layout = SunburstLayout::new(
            SunburstParams {
                inner_radius: 10.0,
                ring_spacing: 5.0,
                rays: 4,
            },
            linear_timing(0.0),
        );
        let els = run(&mut layout, 5);
        assert_relative_eq!(els[0].state(Channel::OffsetX).unwrap().end_value, 10.0);
        // first element of the second ring: radius 15, staggered by 45 degrees
        assert_relative_eq!(els[4].state(Channel::Rotation).unwrap().end_value, 45.0);
        let x = els[4].state(Channel::OffsetX).unwrap().end_value;
        assert_relative_eq!(x, 15.0 * (PI / 4.0).cos(), epsilon = 1e-9);
    }
}
