//! Channel and color value types.

use serde::{Deserialize, Serialize};

/// Linear RGBA color, components nominally in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn from_array(c: [f32; 4]) -> Self {
        Self::rgba(c[0], c[1], c[2], c[3])
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.to_array().iter().all(|c| c.is_finite())
    }
}

/// Numeric animatable channels of an element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    OffsetX,
    OffsetY,
    /// Degrees.
    Rotation,
    ScaleX,
    ScaleY,
    /// [0, 1].
    Opacity,
    /// Generic data-driven value (chart bars and similar).
    Value,
}

impl Channel {
    pub const COUNT: usize = 7;

    pub const ALL: [Channel; Channel::COUNT] = [
        Channel::OffsetX,
        Channel::OffsetY,
        Channel::Rotation,
        Channel::ScaleX,
        Channel::ScaleY,
        Channel::Opacity,
        Channel::Value,
    ];

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Value a channel renders at before anything sets it.
    #[inline]
    pub fn identity(self) -> f64 {
        match self {
            Channel::ScaleX | Channel::ScaleY | Channel::Opacity => 1.0,
            _ => 0.0,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Channel::OffsetX => "offset_x",
            Channel::OffsetY => "offset_y",
            Channel::Rotation => "rotation",
            Channel::ScaleX => "scale_x",
            Channel::ScaleY => "scale_y",
            Channel::Opacity => "opacity",
            Channel::Value => "value",
        }
    }
}

/// Color channels of an element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorChannel {
    Color,
    BackgroundColor,
}
