//! Ordered element groups sharing one layout strategy.

use crate::ids::ElementKey;
use crate::layout::LayoutStrategy;

/// An ordered collection of elements laid out by one strategy. Member order
/// is the `index` handed to the strategy.
#[derive(Debug)]
pub struct AnimatedGroup {
    name: String,
    members: Vec<ElementKey>,
    max_displayed_items: Option<usize>,
    explicit_cap: bool,
    layout: Option<Box<dyn LayoutStrategy>>,
    /// Members included in the most recent layout application.
    pub(crate) laid_out: Vec<ElementKey>,
}

impl AnimatedGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            max_displayed_items: None,
            explicit_cap: false,
            layout: None,
            laid_out: Vec::new(),
        }
    }

    pub fn with_layout(mut self, layout: Box<dyn LayoutStrategy>) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_max_displayed_items(mut self, cap: usize) -> Self {
        self.set_max_displayed_items(Some(cap));
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn members(&self) -> &[ElementKey] {
        &self.members
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, key: ElementKey) -> bool {
        self.members.contains(&key)
    }

    #[inline]
    pub fn max_displayed_items(&self) -> Option<usize> {
        self.max_displayed_items
    }

    /// Set this group's own cap; it no longer follows the engine cap.
    pub fn set_max_displayed_items(&mut self, cap: Option<usize>) {
        self.max_displayed_items = cap;
        self.explicit_cap = true;
    }

    /// Follow the engine-wide cap unless this group set its own.
    pub(crate) fn inherit_max_displayed_items(&mut self, cap: Option<usize>) {
        if !self.explicit_cap {
            self.max_displayed_items = cap;
        }
    }

    /// Members counted by the layout: the first `max_displayed_items`.
    pub fn displayed(&self) -> &[ElementKey] {
        let n = self
            .max_displayed_items
            .map_or(self.members.len(), |cap| cap.min(self.members.len()));
        &self.members[..n]
    }

    pub fn layout(&self) -> Option<&dyn LayoutStrategy> {
        self.layout.as_deref()
    }

    pub fn layout_mut(&mut self) -> Option<&mut (dyn LayoutStrategy + 'static)> {
        self.layout.as_deref_mut()
    }

    /// Attach a strategy, returning the previous one. Already computed
    /// motions are untouched until the next application.
    pub fn set_layout(
        &mut self,
        layout: Option<Box<dyn LayoutStrategy>>,
    ) -> Option<Box<dyn LayoutStrategy>> {
        std::mem::replace(&mut self.layout, layout)
    }

    pub(crate) fn push(&mut self, key: ElementKey) {
        if !self.members.contains(&key) {
            self.members.push(key);
        }
    }

    pub(crate) fn remove(&mut self, key: ElementKey) -> bool {
        self.laid_out.retain(|k| *k != key);
        match self.members.iter().position(|k| *k == key) {
            Some(pos) => {
                self.members.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn take_members(&mut self) -> Vec<ElementKey> {
        self.laid_out.clear();
        std::mem::take(&mut self.members)
    }

    pub(crate) fn parts_mut(
        &mut self,
    ) -> (Option<&mut (dyn LayoutStrategy + 'static)>, &[ElementKey], &mut Vec<ElementKey>) {
        let n = self
            .max_displayed_items
            .map_or(self.members.len(), |cap| cap.min(self.members.len()));
        (self.layout.as_deref_mut(), &self.members[..n], &mut self.laid_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn cap_limits_displayed_members() {
        let mut arena: SlotMap<ElementKey, ()> = SlotMap::with_key();
        let mut g = AnimatedGroup::new("g");
        for _ in 0..5 {
            g.push(arena.insert(()));
        }
        assert_eq!(g.displayed().len(), 5);
        g.inherit_max_displayed_items(Some(3));
        assert_eq!(g.displayed().len(), 3);
        g.set_max_displayed_items(Some(10));
        g.inherit_max_displayed_items(Some(1));
        assert_eq!(g.displayed().len(), 5);
    }
}
