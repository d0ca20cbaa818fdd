//! Stack: elements offset step by step from a base position, fading towards
//! the back of the stack.

use serde::{Deserialize, Serialize};

use super::{LayoutBase, LayoutFrame, LayoutStrategy};
use crate::element::AnimatedElement;
use crate::error::AnimationError;
use crate::state::Timing;
use crate::value::Channel;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackParams {
    pub base_offset_x: f64,
    pub base_offset_y: f64,
    pub spacing_x: f64,
    pub spacing_y: f64,
    /// Opacity lost per step away from the front of the stack.
    pub variant_opacity: f64,
    /// Count steps from the end instead of the start.
    pub reversed: bool,
}

impl Default for StackParams {
    fn default() -> Self {
        Self {
            base_offset_x: 0.0,
            base_offset_y: 0.0,
            spacing_x: 4.0,
            spacing_y: 4.0,
            variant_opacity: 0.0,
            reversed: false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct StackLayout {
    pub params: StackParams,
    base: LayoutBase,
}

impl StackLayout {
    pub fn new(params: StackParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for StackLayout {
    layout_common!("stack");

    fn update(
        &mut self,
        index: usize,
        count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        let p = &self.params;
        let (step, depth) = if p.reversed {
            (count.saturating_sub(index) as f64, index as f64)
        } else {
            (index as f64, count.saturating_sub(index + 1) as f64)
        };
        element.animate_to(Channel::OffsetX, p.base_offset_x + step * p.spacing_x, frame)?;
        element.animate_to(Channel::OffsetY, p.base_offset_y + step * p.spacing_y, frame)?;
        if p.variant_opacity != 0.0 {
            let opacity = (1.0 - depth * p.variant_opacity).clamp(0.0, 1.0);
            element.animate_to(Channel::Opacity, opacity, frame)?;
        }
        Ok(())
    }
}
