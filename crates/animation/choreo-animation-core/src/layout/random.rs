//! Bounded-random placements. Exact values vary; bounds are guaranteed.

use serde::{Deserialize, Serialize};

use super::fixed::{jitter, seeded};
use super::{LayoutBase, LayoutFrame, LayoutStrategy};
use crate::element::AnimatedElement;
use crate::error::AnimationError;
use crate::state::Timing;
use crate::value::Channel;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaosParams {
    /// Half-width of the scatter box around the container center.
    pub spread_x: f64,
    pub spread_y: f64,
    /// Rotation drawn from [-max_rotation, max_rotation] degrees.
    pub max_rotation: f64,
    pub seed: Option<u64>,
}

impl Default for ChaosParams {
    fn default() -> Self {
        Self {
            spread_x: 200.0,
            spread_y: 150.0,
            max_rotation: 45.0,
            seed: None,
        }
    }
}

/// Elements scattered in a box about the container center.
#[derive(Clone, Debug)]
pub struct ChaosLayout {
    pub params: ChaosParams,
    rng: fastrand::Rng,
    base: LayoutBase,
}

impl ChaosLayout {
    pub fn new(params: ChaosParams, timing: Timing) -> Self {
        Self {
            rng: seeded(params.seed),
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for ChaosLayout {
    layout_common!("chaos");

    fn update(
        &mut self,
        _index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let (cx, cy) = frame.center();
        let x = cx + jitter(&mut self.rng, self.params.spread_x);
        let y = cy + jitter(&mut self.rng, self.params.spread_y);
        let r = jitter(&mut self.rng, self.params.max_rotation);
        element.animate_to(Channel::OffsetX, x, frame)?;
        element.animate_to(Channel::OffsetY, y, frame)?;
        element.animate_to(Channel::Rotation, r, frame)?;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatParams {
    /// Maximum displacement from the current position on each axis.
    pub drift: f64,
    pub seed: Option<u64>,
}

impl Default for FloatParams {
    fn default() -> Self {
        Self {
            drift: 20.0,
            seed: None,
        }
    }
}

/// Elements drift a bounded distance from wherever they currently are.
#[derive(Clone, Debug)]
pub struct FloatLayout {
    pub params: FloatParams,
    rng: fastrand::Rng,
    base: LayoutBase,
}

impl FloatLayout {
    pub fn new(params: FloatParams, timing: Timing) -> Self {
        Self {
            rng: seeded(params.seed),
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for FloatLayout {
    layout_common!("float");

    fn update(
        &mut self,
        _index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        for ch in [Channel::OffsetX, Channel::OffsetY] {
            let here = element.current_value(ch, frame.now);
            let target = here + jitter(&mut self.rng, self.params.drift);
            element.animate_to(ch, target, frame)?;
        }
        Ok(())
    }
}
