//! Morphing: a composite strategy stepping through child strategies.
//!
//! Children are keyed by name; the name is their identity for `add` and
//! `remove`. Exactly one child is active at a time, and applying the morph
//! applies the active child. Immediate (zero-duration) mode is refused.

use log::{debug, warn};

use super::{LayoutBase, LayoutFrame, LayoutStrategy};
use crate::element::AnimatedElement;
use crate::error::AnimationError;
use crate::state::Timing;
use crate::time::Timestamp;

#[derive(Debug)]
pub struct MorphingLayout {
    children: Vec<(String, Box<dyn LayoutStrategy>)>,
    cursor: usize,
    /// Wrap from the last child back to the first.
    pub looping: bool,
    base: LayoutBase,
}

impl MorphingLayout {
    pub fn new(timing: Timing) -> Self {
        Self {
            children: Vec::new(),
            cursor: 0,
            looping: true,
            base: LayoutBase::new(timing),
        }
    }

    /// Builder-style `add`.
    pub fn with(mut self, name: impl Into<String>, strategy: Box<dyn LayoutStrategy>) -> Self {
        self.add(name, strategy);
        self
    }

    /// Register a child. Returns false (and drops `strategy`) when a child of
    /// that name is already present or the child refuses the morph's
    /// dimensions. Children always run in timed (non-immediate) mode.
    pub fn add(&mut self, name: impl Into<String>, mut strategy: Box<dyn LayoutStrategy>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        let configured = strategy
            .set_immediate(false)
            .and_then(|_| strategy.set_dimensions(self.base.width(), self.base.height()));
        if let Err(e) = configured {
            warn!("morphing: child '{name}' rejected: {e}");
            return false;
        }
        strategy.apply_start_time(self.base.start_time);
        debug!("morphing: add child '{}' ({})", name, strategy.name());
        self.children.push((name, strategy));
        true
    }

    /// Remove a child by name, keeping the cursor on the same active child
    /// where possible.
    pub fn remove(&mut self, name: &str) -> Option<Box<dyn LayoutStrategy>> {
        let pos = self.children.iter().position(|(n, _)| n == name)?;
        let (_, strategy) = self.children.remove(pos);
        if pos < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.children.len() {
            self.cursor = 0;
        }
        Some(strategy)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.iter().any(|(n, _)| n == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.children.get(self.cursor).map(|(n, _)| n.as_str())
    }

    pub fn active(&self) -> Option<&dyn LayoutStrategy> {
        self.children.get(self.cursor).map(|(_, s)| s.as_ref())
    }

    fn active_mut(&mut self) -> Option<&mut Box<dyn LayoutStrategy>> {
        self.children.get_mut(self.cursor).map(|(_, s)| s)
    }
}

impl LayoutStrategy for MorphingLayout {
    layout_common!("morphing");

    fn update(
        &mut self,
        index: usize,
        count: usize,
        element: &mut AnimatedElement,
        frame: &LayoutFrame,
    ) -> Result<(), AnimationError> {
        match self.active_mut() {
            Some(child) => {
                let child_frame = child.base().frame(frame.now)?;
                child.update(index, count, element, &child_frame)
            }
            None => Ok(()),
        }
    }

    fn set_dimensions(&mut self, width: f64, height: f64) -> Result<(), AnimationError> {
        self.base.set_dimensions(width, height)?;
        for (_, child) in &mut self.children {
            child.set_dimensions(width, height)?;
        }
        Ok(())
    }

    /// Retime the morph and every child.
    fn set_timing(&mut self, timing: Timing) {
        self.base.timing = timing;
        for (_, child) in &mut self.children {
            child.set_timing(timing);
        }
    }

    fn set_immediate(&mut self, immediate: bool) -> Result<(), AnimationError> {
        if immediate {
            return Err(AnimationError::UnsupportedOperation {
                layout: "morphing".into(),
                operation: "immediate mode".into(),
            });
        }
        self.base.immediate = false;
        Ok(())
    }

    fn apply_start_time(&mut self, now: Timestamp) {
        self.base.start_time = now;
        for (_, child) in &mut self.children {
            child.apply_start_time(now);
        }
    }

    fn apply(
        &mut self,
        elements: &mut [AnimatedElement],
        now: Timestamp,
    ) -> Result<(), AnimationError> {
        match self.active_mut() {
            Some(child) => child.apply(elements, now),
            None => Ok(()),
        }
    }

    fn next_layout(&mut self) -> bool {
        if self.children.len() < 2 {
            return false;
        }
        if self.cursor + 1 < self.children.len() {
            self.cursor += 1;
        } else if self.looping {
            self.cursor = 0;
        } else {
            return false;
        }
        debug!("morphing: now on '{}'", self.children[self.cursor].0);
        true
    }

    fn dispose(&mut self) {
        for (_, child) in &mut self.children {
            child.dispose();
        }
        self.children.clear();
        self.cursor = 0;
    }
}
