//! Easing curves.
//!
//! Every curve is expressed as an "in" curve over [0, 1]; modes derive the
//! out and in-out shapes from it. Endpoints are exact: `ease(0) == 0` and
//! `ease(1) == 1` for every supported pair.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AnimationError;

/// Base curve family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    #[default]
    Linear,
    /// Slow start.
    ExponentialIn,
    /// Slow end.
    ExponentialOut,
    Sine,
    Quadratic,
    Cubic,
}

impl EasingFunction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::ExponentialIn => "exponential_in",
            Self::ExponentialOut => "exponential_out",
            Self::Sine => "sine",
            Self::Quadratic => "quadratic",
            Self::Cubic => "cubic",
        }
    }
}

impl fmt::Display for EasingFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingMode {
    In,
    Out,
    #[default]
    InOut,
}

impl EasingMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
            Self::InOut => "in_out",
        }
    }
}

impl fmt::Display for EasingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn check(function: EasingFunction, mode: EasingMode) -> Result<(), AnimationError> {
    let supported = match function {
        EasingFunction::ExponentialIn => mode != EasingMode::Out,
        EasingFunction::ExponentialOut => mode != EasingMode::In,
        _ => true,
    };
    if supported {
        Ok(())
    } else {
        Err(AnimationError::UnsupportedEasing {
            function: function.to_string(),
            mode: mode.to_string(),
        })
    }
}

#[inline]
fn exponential_in(t: f64) -> f64 {
    // Normalized so both endpoints land exactly.
    (2f64.powf(10.0 * t) - 1.0) / 1023.0
}

#[inline]
fn curve_in(function: EasingFunction, t: f64) -> f64 {
    match function {
        EasingFunction::Linear => t,
        EasingFunction::ExponentialIn | EasingFunction::ExponentialOut => exponential_in(t),
        EasingFunction::Sine => 1.0 - (t * FRAC_PI_2).cos(),
        EasingFunction::Quadratic => t * t,
        EasingFunction::Cubic => t * t * t,
    }
}

#[inline]
fn shaped(function: EasingFunction, mode: EasingMode, t: f64) -> f64 {
    if t <= 0.0 || t.is_nan() {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    if function == EasingFunction::Linear {
        return t;
    }
    // ExponentialOut is the mirrored exponential; its native mode is Out.
    let mode = match (function, mode) {
        (EasingFunction::ExponentialIn, EasingMode::InOut)
        | (EasingFunction::ExponentialOut, EasingMode::InOut) => EasingMode::InOut,
        (EasingFunction::ExponentialIn, _) => EasingMode::In,
        (EasingFunction::ExponentialOut, _) => EasingMode::Out,
        (_, m) => m,
    };
    let v = match mode {
        EasingMode::In => curve_in(function, t),
        EasingMode::Out => 1.0 - curve_in(function, 1.0 - t),
        EasingMode::InOut => {
            if t < 0.5 {
                0.5 * curve_in(function, 2.0 * t)
            } else {
                1.0 - 0.5 * curve_in(function, 2.0 * (1.0 - t))
            }
        }
    };
    v.clamp(0.0, 1.0)
}

/// Ease normalized progress `t` (clamped to [0, 1]).
///
/// Fails with [`AnimationError::UnsupportedEasing`] for pairs with no
/// defined curve (exponential-in as out, exponential-out as in).
pub fn ease(t: f64, function: EasingFunction, mode: EasingMode) -> Result<f64, AnimationError> {
    check(function, mode)?;
    Ok(shaped(function, mode, t))
}

#[derive(Deserialize)]
struct EasingRepr {
    #[serde(default)]
    function: EasingFunction,
    #[serde(default)]
    mode: EasingMode,
}

/// A validated easing selection. Construction fails for unsupported pairs,
/// so evaluation is infallible.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "EasingRepr")]
pub struct Easing {
    function: EasingFunction,
    mode: EasingMode,
}

impl TryFrom<EasingRepr> for Easing {
    type Error = AnimationError;

    fn try_from(repr: EasingRepr) -> Result<Self, Self::Error> {
        Easing::new(repr.function, repr.mode)
    }
}

impl Easing {
    pub const LINEAR: Easing = Easing {
        function: EasingFunction::Linear,
        mode: EasingMode::InOut,
    };

    pub fn new(function: EasingFunction, mode: EasingMode) -> Result<Self, AnimationError> {
        check(function, mode)?;
        Ok(Self { function, mode })
    }

    #[inline]
    pub fn function(&self) -> EasingFunction {
        self.function
    }

    #[inline]
    pub fn mode(&self) -> EasingMode {
        self.mode
    }

    /// Eased progress for `t` in [0, 1].
    #[inline]
    pub fn apply(&self, t: f64) -> f64 {
        shaped(self.function, self.mode, t)
    }
}

impl Default for Easing {
    fn default() -> Self {
        Self {
            function: EasingFunction::Sine,
            mode: EasingMode::InOut,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_out_is_symmetric() {
        let e = Easing::new(EasingFunction::Cubic, EasingMode::InOut).unwrap();
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let mirrored = 1.0 - e.apply(1.0 - t);
            assert!((e.apply(t) - mirrored).abs() < 1e-12);
        }
    }

    #[test]
    fn deserialize_rejects_unsupported_pair() {
        let bad = r#"{"function":"exponential_in","mode":"out"}"#;
        assert!(serde_json::from_str::<Easing>(bad).is_err());
        let ok = r#"{"function":"sine","mode":"in"}"#;
        let e: Easing = serde_json::from_str(ok).unwrap();
        assert_eq!(e.function(), EasingFunction::Sine);
    }
}
