//! Grid and snake (boustrophedon) placement.

use serde::{Deserialize, Serialize};

use super::{LayoutBase, LayoutFrame, LayoutStrategy};
use crate::element::AnimatedElement;
use crate::error::AnimationError;
use crate::state::Timing;
use crate::value::Channel;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridParams {
    /// Column count; 0 fits as many cells as the container width allows.
    pub columns: usize,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            columns: 0,
            cell_width: 100.0,
            cell_height: 100.0,
        }
    }
}

impl GridParams {
    fn resolve_columns(&self, frame: &LayoutFrame) -> Result<usize, AnimationError> {
        if self.columns > 0 {
            return Ok(self.columns);
        }
        if self.cell_width > 0.0 && frame.width > 0.0 {
            return Ok(((frame.width / self.cell_width).floor() as usize).max(1));
        }
        Err(AnimationError::InvalidDimensions {
            width: frame.width,
            height: frame.height,
        })
    }
}

fn place(
    params: &GridParams,
    index: usize,
    element: &mut AnimatedElement,
    frame: &LayoutFrame,
    mirror_odd_rows: bool,
) -> Result<(), AnimationError> {
    let columns = params.resolve_columns(frame)?;
    let row = index / columns;
    let mut col = index % columns;
    if mirror_odd_rows && row % 2 == 1 {
        col = columns - 1 - col;
    }
    element.animate_to(Channel::OffsetX, col as f64 * params.cell_width, frame)?;
    element.animate_to(Channel::OffsetY, row as f64 * params.cell_height, frame)?;
    Ok(())
}

#[derive(Clone, Debug)]
pub struct GridLayout {
    pub params: GridParams,
    base: LayoutBase,
}

impl GridLayout {
    pub fn new(params: GridParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for GridLayout {
    layout_common!("grid");

    fn update(
        &mut self,
        index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        place(&self.params, index, element, frame, false)
    }
}

/// Grid whose odd rows run right-to-left.
#[derive(Clone, Debug)]
pub struct SnakeLayout {
    pub params: GridParams,
    base: LayoutBase,
}

impl SnakeLayout {
    pub fn new(params: GridParams, timing: Timing) -> Self {
        Self {
            params,
            base: LayoutBase::new(timing),
        }
    }
}

impl LayoutStrategy for SnakeLayout {
    layout_common!("snake");

    fn update(
        &mut self,
        index: usize,
        _count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        place(&self.params, index, element, frame, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::test_support::{linear_timing, run};

    fn params() -> GridParams {
        GridParams {
            columns: 3,
            cell_width: 10.0,
            cell_height: 20.0,
        }
    }

    #[test]
    fn grid_rows_and_columns() {
        let mut layout = GridLayout::new(params(), linear_timing(0.0));
        let els = run(&mut layout, 5);
        let end = |i: usize, ch| els[i].state(ch).unwrap().end_value;
        assert_eq!(end(1, Channel::OffsetX), 10.0);
        assert_eq!(end(4, Channel::OffsetX), 10.0);
        assert_eq!(end(4, Channel::OffsetY), 20.0);
    }

    #[test]
    fn snake_mirrors_odd_rows() {
        let mut layout = SnakeLayout::new(params(), linear_timing(0.0));
        let els = run(&mut layout, 6);
        let x = |i: usize| els[i].state(Channel::OffsetX).unwrap().end_value;
        assert_eq!(x(0), 0.0);
        assert_eq!(x(2), 20.0);
        assert_eq!(x(3), 20.0);
        assert_eq!(x(5), 0.0);
    }

    #[test]
    fn auto_columns_need_a_width() {
        let mut layout = GridLayout::new(
            GridParams {
                columns: 0,
                ..params()
            },
            linear_timing(0.0),
        );
        let mut els = vec![AnimatedElement::new("a")];
        assert!(layout.apply(&mut els, crate::time::Timestamp::zero()).is_err());

        layout.set_dimensions(35.0, 100.0).unwrap();
        let els = run(&mut layout, 4);
        // 35 / 10 -> three columns
        assert_eq!(els[3].state(Channel::OffsetY).unwrap().end_value, 20.0);
    }
}
