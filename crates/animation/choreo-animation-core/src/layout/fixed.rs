//! Fixed-target strategies: orbit ring, magnet and pin.

use serde::{Deserialize, Serialize};

use super::{polar, LayoutBase, LayoutFrame, LayoutStrategy};
use crate::element::AnimatedElement;
use crate::error::AnimationError;
use crate::state::Timing;
use crate::value::Channel;

fn target_point(x: Option<f64>, y: Option<f64>, frame: &LayoutFrame) -> (f64, f64) {
    let (cx, cy) = frame.center();
    (x.unwrap_or(cx), y.unwrap_or(cy))
}

pub(crate) fn seeded(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    }
}

/// Uniform sample in [-bound, bound].
#[inline]
pub(crate) fn jitter(rng: &mut fastrand::Rng, bound: f64) -> f64 {
    if bound <= 0.0 {
        return 0.0;
    }
    (rng.f64() * 2.0 - 1.0) * bound
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitParams {
    /// Orbit center; `None` uses the container center.
    pub center_x: Option<f64>,
    pub center_y: Option<f64>,
    pub radius: f64,
    pub start_angle: f64,
}

impl Default for OrbitParams {
    fn default() -> Self {
        Self {
            center_x: None,
            center_y: None,
            radius: 120.0,
            start_angle: 0.0,
        }
    }
}

/// Elements evenly spaced on an orbit about a point, rotated tangentially.
#[derive(Clone, Debug)]
pub struct OrbitLayout {
    pub params: OrbitParams,
    base: LayoutBase,
}

impl OrbitLayout {
    pub fn new(params: OrbitParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for OrbitLayout {
    layout_common!("orbit");

    fn update(
        &mut self,
        index: usize,
        count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let p = &self.params;
        let (cx, cy) = target_point(p.center_x, p.center_y, frame);
        let angle = p.start_angle + 360.0 * index as f64 / count.max(1) as f64;
        let (x, y) = polar(cx, cy, p.radius, angle);
        element.animate_to(Channel::OffsetX, x, frame)?;
        element.animate_to(Channel::OffsetY, y, frame)?;
        element.animate_to(Channel::Rotation, angle + 90.0, frame)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnetParams {
    pub target_x: Option<f64>,
    pub target_y: Option<f64>,
    /// Maximum distance from the target on each axis.
    pub jitter: f64,
    pub scale: Option<f64>,
    pub seed: Option<u64>,
}

impl Default for MagnetParams {
    fn default() -> Self {
        Self {
            target_x: None,
            target_y: None,
            jitter: 10.0,
            scale: None,
            seed: None,
        }
    }
}

/// Every element pulled onto one point, scattered by bounded jitter.
#[derive(Clone, Debug)]
pub struct MagnetLayout {
    pub params: MagnetParams,
    rng: fastrand::Rng,
    base: LayoutBase,
}

impl MagnetLayout {
    pub fn new(params: MagnetParams, timing: Timing) -> Self {
        Self {
            rng: seeded(params.seed),
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for MagnetLayout {
    layout_common!("magnet");

    fn update(
        &mut self,
        _index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let (tx, ty) = target_point(self.params.target_x, self.params.target_y, frame);
        let x = tx + jitter(&mut self.rng, self.params.jitter);
        let y = ty + jitter(&mut self.rng, self.params.jitter);
        element.animate_to(Channel::OffsetX, x, frame)?;
        element.animate_to(Channel::OffsetY, y, frame)?;
        if let Some(scale) = self.params.scale {
            element.animate_to(Channel::ScaleX, scale, frame)?;
            element.animate_to(Channel::ScaleY, scale, frame)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinParams {
    pub target_x: f64,
    pub target_y: f64,
    /// Indices moved to the pin; the rest keep their motion untouched.
    pub indices: Vec<usize>,
}

/// A subset of elements placed on one point.
#[derive(Clone, Debug)]
pub struct PinLayout {
    pub params: PinParams,
    base: LayoutBase,
}

impl PinLayout {
    pub fn new(params: PinParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for PinLayout {
    layout_common!("pin");

    fn update(
        &mut self,
        index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        if !self.params.indices.contains(&index) {
            return Ok(());
        }
        element.animate_to(Channel::OffsetX, self.params.target_x, frame)?;
        element.animate_to(Channel::OffsetY, self.params.target_y, frame)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::{linear_timing, run};

    #[test]
    fn magnet_stays_within_jitter() {
        let mut layout = MagnetLayout::new(
            MagnetParams {
                target_x: Some(50.0),
                target_y: Some(-20.0),
                jitter: 5.0,
                seed: Some(7),
                ..Default::default()
            },
            linear_timing(100.0),
        );
        for el in run(&mut layout, 32) {
            let x = el.state(Channel::OffsetX).unwrap().end_value;
            let y = el.state(Channel::OffsetY).unwrap().end_value;
            assert!((45.0..=55.0).contains(&x));
            assert!((-25.0..=-15.0).contains(&y));
        }
    }

    #[test]
    fn pin_moves_only_selected() {
        let mut layout = PinLayout::new(
            PinParams {
                target_x: 3.0,
                target_y: 4.0,
                indices: vec![1],
            },
            linear_timing(100.0),
        );
        let els = run(&mut layout, 3);
        assert!(els[0].state(Channel::OffsetX).is_none());
        assert_eq!(els[1].state(Channel::OffsetX).unwrap().end_value, 3.0);
        assert!(els[2].state(Channel::OffsetY).is_none());
    }
}
