//! Time base for the engine.
//!
//! The engine never reads a clock on its own: every operation that depends on
//! time takes a [`Timestamp`]. Hosts that want wall-clock driving use
//! [`SystemClock`]; tests and offline renderers use [`ManualClock`].

use std::cell::Cell;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// An instant on the animation time line, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Timestamp(f64);

impl Timestamp {
    /// Zero time
    #[inline]
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Create a timestamp from milliseconds. Non-finite input maps to zero;
    /// use [`Timestamp::try_from_millis`] to reject it instead.
    #[inline]
    pub fn from_millis(millis: f64) -> Self {
        if millis.is_finite() {
            Self(millis)
        } else {
            Self(0.0)
        }
    }

    #[inline]
    pub fn try_from_millis(millis: f64) -> Result<Self, AnimationError> {
        if !millis.is_finite() {
            return Err(AnimationError::invalid(format!(
                "timestamp must be finite, got {millis}"
            )));
        }
        Ok(Self(millis))
    }

    #[inline]
    pub fn from_seconds(seconds: f64) -> Self {
        Self::from_millis(seconds * 1000.0)
    }

    #[inline]
    pub fn as_millis(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn as_seconds(&self) -> f64 {
        self.0 / 1000.0
    }

    /// Milliseconds elapsed since `earlier`, saturating at zero.
    #[inline]
    pub fn elapsed_since(&self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    /// Shift this instant by `millis` (may be negative).
    #[inline]
    pub fn offset(&self, millis: f64) -> Self {
        Self::from_millis(self.0 + millis)
    }
}

impl From<f64> for Timestamp {
    fn from(millis: f64) -> Self {
        Self::from_millis(millis)
    }
}

/// Source of "now" for hosts that drive the engine from a frame loop.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Monotonic clock measuring from its own creation.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(self.origin.elapsed().as_secs_f64() * 1000.0)
    }
}

/// Virtual clock advanced explicitly by the caller.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start.as_millis()),
        }
    }

    pub fn set(&self, t: Timestamp) {
        self.now.set(t.as_millis());
    }

    pub fn advance(&self, millis: f64) {
        if millis.is_finite() {
            self.now.set(self.now.get() + millis);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.now.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite() {
        assert!(Timestamp::try_from_millis(f64::NAN).is_err());
        assert!(Timestamp::try_from_millis(f64::INFINITY).is_err());
        assert_eq!(Timestamp::from_millis(f64::NAN), Timestamp::zero());
    }

    #[test]
    fn elapsed_saturates() {
        let a = Timestamp::from_millis(100.0);
        let b = Timestamp::from_millis(250.0);
        assert_eq!(b.elapsed_since(a), 150.0);
        assert_eq!(a.elapsed_since(b), 0.0);
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(Timestamp::from_millis(10.0));
        clock.advance(15.0);
        assert_eq!(clock.now().as_millis(), 25.0);
        clock.set(Timestamp::zero());
        assert_eq!(clock.now(), Timestamp::zero());
    }
}
