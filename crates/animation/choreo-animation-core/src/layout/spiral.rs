//! Polar spirals about the container center.

use serde::{Deserialize, Serialize};

use super::{polar, LayoutBase, LayoutFrame, LayoutStrategy};
use crate::element::AnimatedElement;
use crate::error::AnimationError;
use crate::state::Timing;
use crate::value::Channel;

/// Golden angle in degrees.
pub const GOLDEN_ANGLE: f64 = 137.507_764_050_037_85;

fn place_polar(
    element: &mut AnimatedElement,
    frame: &LayoutFrame,
    radius: f64,
    angle: f64,
) -> Result<(), AnimationError> {
    let (cx, cy) = frame.center();
    let (x, y) = polar(cx, cy, radius, angle);
    element.animate_to(Channel::OffsetX, x, frame)?;
    element.animate_to(Channel::OffsetY, y, frame)?;
    element.animate_to(Channel::Rotation, angle % 360.0, frame)?;
    Ok(())
}

fn require_arms(arms: usize) -> Result<(), AnimationError> {
    if arms == 0 {
        return Err(AnimationError::invalid("galaxy needs at least one arm"));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralParams {
    pub start_radius: f64,
    pub radius_step: f64,
    /// Degrees between consecutive elements.
    pub angle_step: f64,
}

impl Default for SpiralParams {
    fn default() -> Self {
        Self {
            start_radius: 10.0,
            radius_step: 8.0,
            angle_step: 30.0,
        }
    }
}

/// Archimedean spiral: radius grows linearly with the index.
#[derive(Clone, Debug)]
pub struct SpiralLayout {
    pub params: SpiralParams,
    base: LayoutBase,
}

impl SpiralLayout {
    pub fn new(params: SpiralParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for SpiralLayout {
    layout_common!("spiral");

    fn update(
        &mut self,
        index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let p = &self.params;
        let i = index as f64;
        place_polar(element, frame, p.start_radius + i * p.radius_step, i * p.angle_step)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoldenSpiralParams {
    pub scale: f64,
}

impl Default for GoldenSpiralParams {
    fn default() -> Self {
        Self { scale: 12.0 }
    }
}

/// Phyllotaxis: golden-angle steps, radius proportional to sqrt(index).
#[derive(Clone, Debug)]
pub struct GoldenSpiralLayout {
    pub params: GoldenSpiralParams,
    base: LayoutBase,
}

impl GoldenSpiralLayout {
    pub fn new(params: GoldenSpiralParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for GoldenSpiralLayout {
    layout_common!("golden_spiral");

    fn update(
        &mut self,
        index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let i = index as f64;
        place_polar(element, frame, self.params.scale * i.sqrt(), i * GOLDEN_ANGLE)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiralGalaxyParams {
    pub arms: usize,
    /// Radius of the first element of each arm.
    pub scale: f64,
    /// Logarithmic growth rate per radian.
    pub growth: f64,
    /// Degrees travelled along an arm per element.
    pub angle_step: f64,
}

impl Default for SpiralGalaxyParams {
    fn default() -> Self {
        Self {
            arms: 2,
            scale: 12.0,
            growth: 0.2,
            angle_step: 25.0,
        }
    }
}

/// Logarithmic spiral arms, elements dealt round-robin across arms.
#[derive(Clone, Debug)]
pub struct SpiralGalaxyLayout {
    pub params: SpiralGalaxyParams,
    base: LayoutBase,
}

impl SpiralGalaxyLayout {
    pub fn new(params: SpiralGalaxyParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for SpiralGalaxyLayout {
    layout_common!("spiral_galaxy");

    fn update(
        &mut self,
        index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let p = &self.params;
        require_arms(p.arms)?;
        let arm = index % p.arms;
        let step = (index / p.arms) as f64;
        let travelled = step * p.angle_step;
        let radius = p.scale * (p.growth * travelled.to_radians()).exp();
        let angle = arm as f64 * 360.0 / p.arms as f64 + travelled;
        place_polar(element, frame, radius, angle)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyParams {
    pub arms: usize,
    /// Radial distance between consecutive elements of an arm.
    pub spacing: f64,
    /// Degrees an arm bends per element.
    pub twist: f64,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            arms: 3,
            spacing: 20.0,
            twist: 15.0,
        }
    }
}

/// Elements partitioned into `arms` linear sub-spirals.
#[derive(Clone, Debug)]
pub struct GalaxyLayout {
    pub params: GalaxyParams,
    base: LayoutBase,
}

impl GalaxyLayout {
    pub fn new(params: GalaxyParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for GalaxyLayout {
    layout_common!("galaxy");

    fn update(
        &mut self,
        index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let p = &self.params;
        require_arms(p.arms)?;
        let arm = index % p.arms;
        let step = (index / p.arms) as f64;
        let radius = (step + 1.0) * p.spacing;
        let angle = arm as f64 * 360.0 / p.arms as f64 + step * p.twist;
        place_polar(element, frame, radius, angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::{linear_timing, run};
    use crate::time::Timestamp;
    use approx::assert_relative_eq;

    #[test]
    fn spiral_is_centered_on_container() {
        let mut layout = SpiralLayout::new(
            SpiralParams {
                start_radius: 0.0,
                radius_step: 10.0,
                angle_step: 90.0,
            },
            linear_timing(0.0),
        );
        layout.set_dimensions(100.0, 60.0).unwrap();
        let els = run(&mut layout, 2);
        assert_relative_eq!(els[0].state(Channel::OffsetX).unwrap().end_value, 50.0);
        assert_relative_eq!(els[1].state(Channel::OffsetY).unwrap().end_value, 40.0);
        assert_relative_eq!(els[1].state(Channel::Rotation).unwrap().end_value, 90.0);
    }

    #[test]
    fn galaxy_deals_elements_across_arms() {
        let mut layout = GalaxyLayout::new(
            GalaxyParams {
                arms: 2,
                spacing: 10.0,
                twist: 0.0,
            },
            linear_timing(0.0),
        );
        let els = run(&mut layout, 4);
        // arm 0 points along +x, arm 1 along -x
        assert_relative_eq!(els[0].state(Channel::OffsetX).unwrap().end_value, 10.0);
        assert_relative_eq!(els[1].state(Channel::OffsetX).unwrap().end_value, -10.0);
        assert_relative_eq!(els[2].state(Channel::OffsetX).unwrap().end_value, 20.0);
        assert_relative_eq!(els[3].state(Channel::OffsetX).unwrap().end_value, -20.0);
    }

    #[test]
    fn zero_arms_fail() {
        let mut layout = SpiralGalaxyLayout::new(
            SpiralGalaxyParams {
                arms: 0,
                ..Default::default()
            },
            linear_timing(0.0),
        );
        let mut els = vec![AnimatedElement::new("a")];
        assert!(layout.apply(&mut els, Timestamp::zero()).is_err());
    }
}
