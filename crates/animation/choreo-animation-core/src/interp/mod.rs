//! Interpolation helpers: easing curves and value blending.
//!
//! Easing maps normalized progress to eased progress; `functions` blends
//! start/end values with an eased factor.

pub mod easing;
pub mod functions;

pub use easing::{ease, Easing, EasingFunction, EasingMode};
pub use functions::{lerp_color, lerp_f64};
