//! Layout strategies.
//!
//! A strategy computes per-element target values from `(index, count,
//! container dimensions, parameters)` and writes a fresh motion for every
//! channel it drives: start at the currently rendered value, end at the
//! computed target. Strategies never read the wall clock; the only time they
//! see is the `now` handed to [`LayoutStrategy::apply`] and the origin
//! stamped by [`LayoutStrategy::apply_start_time`].

use std::f64::consts::PI;
use std::fmt;

use crate::element::AnimatedElement;
use crate::error::AnimationError;
use crate::state::Timing;
use crate::time::Timestamp;

/// Implements the accessor boilerplate shared by every strategy holding a
/// `base: LayoutBase` field.
macro_rules! layout_common {
    ($name:literal) => {
        fn name(&self) -> &str {
            $name
        }

        fn base(&self) -> &$crate::layout::LayoutBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut $crate::layout::LayoutBase {
            &mut self.base
        }
    };
}

pub mod fan;
pub mod fixed;
pub mod grid;
pub mod morph;
pub mod parametric;
pub mod pulse;
pub mod radial;
pub mod random;
pub mod spec;
pub mod spiral;
pub mod stack;
pub mod wave;

pub use fan::{FanLayout, FanParams};
pub use fixed::{MagnetLayout, MagnetParams, OrbitLayout, OrbitParams, PinLayout, PinParams};
pub use grid::{GridLayout, GridParams, SnakeLayout};
pub use morph::MorphingLayout;
pub use parametric::{
    FlowerLayout, FlowerParams, HeartLayout, HeartParams, SunburstLayout, SunburstParams,
};
pub use pulse::{PulseLayout, PulseParams};
pub use radial::{CircleLayout, CircleParams, LineLayout, LineParams};
pub use random::{ChaosLayout, ChaosParams, FloatLayout, FloatParams};
pub use spec::LayoutSpec;
pub use spiral::{
    GalaxyLayout, GalaxyParams, GoldenSpiralLayout, GoldenSpiralParams, SpiralGalaxyLayout,
    SpiralGalaxyParams, SpiralLayout, SpiralParams,
};
pub use stack::{StackLayout, StackParams};
pub use wave::{WaveLayout, WaveParams};

pub(crate) fn validate_dimensions(width: f64, height: f64) -> Result<(), AnimationError> {
    if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
        return Err(AnimationError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[inline]
pub(crate) fn polar(cx: f64, cy: f64, radius: f64, angle_deg: f64) -> (f64, f64) {
    let a = angle_deg * PI / 180.0;
    (cx + radius * a.cos(), cy + radius * a.sin())
}

/// Configuration shared by every strategy.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutBase {
    width: f64,
    height: f64,
    pub timing: Timing,
    pub immediate: bool,
    /// Origin of time-based strategies; restamped by `apply_start_time`.
    pub start_time: Timestamp,
}

impl LayoutBase {
    pub fn new(timing: Timing) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            timing,
            immediate: false,
            start_time: Timestamp::zero(),
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Container size; the only way to change it, so it is always valid.
    pub fn set_dimensions(&mut self, width: f64, height: f64) -> Result<(), AnimationError> {
        validate_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Snapshot of the configuration for one application at `now`.
    pub fn frame(&self, now: Timestamp) -> Result<LayoutFrame, AnimationError> {
        validate_dimensions(self.width, self.height)?;
        Ok(LayoutFrame {
            now,
            origin: self.start_time,
            width: self.width,
            height: self.height,
            timing: self.timing,
            immediate: self.immediate,
        })
    }
}

impl Default for LayoutBase {
    fn default() -> Self {
        Self::new(Timing::default())
    }
}

/// Read-only context of a single layout application.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutFrame {
    pub now: Timestamp,
    pub origin: Timestamp,
    pub width: f64,
    pub height: f64,
    pub timing: Timing,
    pub immediate: bool,
}

impl LayoutFrame {
    /// Timing for an element: immediate mode wins, then the element override,
    /// then the strategy default.
    #[inline]
    pub fn timing_for(&self, element_override: Option<Timing>) -> Timing {
        if self.immediate {
            Timing::immediate()
        } else {
            element_override.unwrap_or(self.timing)
        }
    }

    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// A geometric animation target computation.
pub trait LayoutStrategy: fmt::Debug {
    fn name(&self) -> &str;

    fn base(&self) -> &LayoutBase;

    fn base_mut(&mut self) -> &mut LayoutBase;

    /// Set the motions of one element. `index` is the element's position in
    /// the laid-out sequence and `count` the sequence length.
    fn update(
        &mut self,
        index: usize,
        count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError>;

    fn set_dimensions(&mut self, width: f64, height: f64) -> Result<(), AnimationError> {
        self.base_mut().set_dimensions(width, height)
    }

    fn set_timing(&mut self, timing: Timing) {
        self.base_mut().timing = timing;
    }

    /// Zero-duration application.
    fn set_immediate(&mut self, immediate: bool) -> Result<(), AnimationError> {
        self.base_mut().immediate = immediate;
        Ok(())
    }

    fn apply_start_time(&mut self, now: Timestamp) {
        self.base_mut().start_time = now;
    }

    /// Lay out `elements` in order. On error, elements may be partially
    /// updated; callers that need atomicity apply to a copy.
    fn apply(&mut self, elements: &mut [AnimatedElement], now: Timestamp) -> Result<(), AnimationError> {
        let frame = self.base().frame(now)?;
        let count = elements.len();
        for (index, element) in elements.iter_mut().enumerate() {
            self.update(index, count, element, &frame)?;
        }
        Ok(())
    }

    /// Advance a composite strategy to its next child. Leaf strategies never
    /// transition.
    fn next_layout(&mut self) -> bool {
        false
    }

    fn dispose(&mut self) {}
}
