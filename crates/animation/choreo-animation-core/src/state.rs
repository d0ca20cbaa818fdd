//! Per-channel interpolation state.

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;
use crate::interp::{lerp_color, lerp_f64, Easing};
use crate::time::Timestamp;
use crate::value::Color;

/// Duration and easing applied to a motion.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Timing {
    pub duration_ms: f64,
    pub easing: Easing,
}

impl Timing {
    pub fn new(duration_ms: f64, easing: Easing) -> Result<Self, AnimationError> {
        if !duration_ms.is_finite() {
            return Err(AnimationError::invalid(format!(
                "duration must be finite, got {duration_ms}"
            )));
        }
        Ok(Self {
            // Negative durations are "already complete".
            duration_ms: duration_ms.max(0.0),
            easing,
        })
    }

    /// Zero-duration timing: values jump to their targets.
    pub fn immediate() -> Self {
        Self {
            duration_ms: 0.0,
            easing: Easing::LINEAR,
        }
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            duration_ms: 500.0,
            easing: Easing::default(),
        }
    }
}

/// Motion of one numeric channel from `start_value` to `end_value`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedState {
    pub start_value: f64,
    pub end_value: f64,
    pub start_time: Timestamp,
    pub duration_ms: f64,
    pub easing: Easing,
}

impl InterpolatedState {
    pub fn new(
        start_value: f64,
        end_value: f64,
        start_time: Timestamp,
        timing: Timing,
    ) -> Result<Self, AnimationError> {
        if !start_value.is_finite() || !end_value.is_finite() {
            return Err(AnimationError::invalid(format!(
                "state values must be finite, got {start_value} -> {end_value}"
            )));
        }
        Ok(Self {
            start_value,
            end_value,
            start_time,
            duration_ms: timing.duration_ms.max(0.0),
            easing: timing.easing,
        })
    }

    /// State already resting at `value`.
    pub fn settled(value: f64, at: Timestamp) -> Self {
        Self {
            start_value: value,
            end_value: value,
            start_time: at,
            duration_ms: 0.0,
            easing: Easing::LINEAR,
        }
    }

    /// Normalized linear progress in [0, 1].
    #[inline]
    pub fn progress(&self, now: Timestamp) -> f64 {
        if self.duration_ms <= 0.0 {
            return if now >= self.start_time { 1.0 } else { 0.0 };
        }
        (now.elapsed_since(self.start_time) / self.duration_ms).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn current_value(&self, now: Timestamp) -> f64 {
        let p = self.progress(now);
        if p >= 1.0 {
            return self.end_value;
        }
        lerp_f64(self.start_value, self.end_value, self.easing.apply(p))
    }

    #[inline]
    pub fn is_complete(&self, now: Timestamp) -> bool {
        self.progress(now) >= 1.0
    }

    /// Restart the motion at `now` without changing its endpoints.
    #[inline]
    pub fn rebase(&mut self, now: Timestamp) {
        self.start_time = now;
    }
}

/// Motion of a color channel. Colors swap atomically at `start_time`
/// unless `interpolate` is set, in which case components are eased.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorState {
    pub start_value: Color,
    pub end_value: Color,
    pub start_time: Timestamp,
    pub duration_ms: f64,
    pub easing: Easing,
    #[serde(default)]
    pub interpolate: bool,
}

impl ColorState {
    /// Atomic swap to `color` at `at`.
    pub fn swap(from: Color, color: Color, at: Timestamp) -> Self {
        Self {
            start_value: from,
            end_value: color,
            start_time: at,
            duration_ms: 0.0,
            easing: Easing::LINEAR,
            interpolate: false,
        }
    }

    pub fn eased(
        from: Color,
        to: Color,
        at: Timestamp,
        timing: Timing,
    ) -> Result<Self, AnimationError> {
        if !from.is_finite() || !to.is_finite() {
            return Err(AnimationError::invalid("color components must be finite"));
        }
        Ok(Self {
            start_value: from,
            end_value: to,
            start_time: at,
            duration_ms: timing.duration_ms.max(0.0),
            easing: timing.easing,
            interpolate: true,
        })
    }

    pub fn current_value(&self, now: Timestamp) -> Color {
        if now < self.start_time {
            return self.start_value;
        }
        if !self.interpolate || self.duration_ms <= 0.0 {
            return self.end_value;
        }
        let p = (now.elapsed_since(self.start_time) / self.duration_ms).clamp(0.0, 1.0);
        if p >= 1.0 {
            return self.end_value;
        }
        lerp_color(self.start_value, self.end_value, self.easing.apply(p))
    }

    #[inline]
    pub fn rebase(&mut self, now: Timestamp) {
        self.start_time = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::{EasingFunction, EasingMode};

    fn linear(ms: f64) -> Timing {
        Timing::new(
            ms,
            Easing::new(EasingFunction::Linear, EasingMode::In).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn zero_duration_jumps_to_end() {
        let t0 = Timestamp::from_millis(100.0);
        let s = InterpolatedState::new(0.0, 42.0, t0, linear(0.0)).unwrap();
        assert_eq!(s.current_value(t0), 42.0);
        assert_eq!(s.current_value(t0.offset(1e6)), 42.0);
    }

    #[test]
    fn negative_duration_is_complete() {
        let t0 = Timestamp::zero();
        let timing = linear(-50.0);
        assert_eq!(timing.duration_ms, 0.0);
        let s = InterpolatedState::new(1.0, 2.0, t0, timing).unwrap();
        assert!(s.is_complete(t0));
    }

    #[test]
    fn rejects_non_finite_values() {
        let err = InterpolatedState::new(f64::NAN, 1.0, Timestamp::zero(), linear(10.0));
        assert!(err.is_err());
    }

    #[test]
    fn color_swap_is_atomic() {
        let t0 = Timestamp::from_millis(10.0);
        let c = ColorState::swap(Color::BLACK, Color::WHITE, t0);
        assert_eq!(c.current_value(Timestamp::from_millis(9.0)), Color::BLACK);
        assert_eq!(c.current_value(t0), Color::WHITE);
    }
}
