//! Engine: element and group registry, layout application and frame snapshots.
//!
//! Elements live in a generational arena and are addressed by host string ids
//! at the API boundary. Every element is either in the ungrouped list, laid
//! out by the engine strategy, or in exactly one group, laid out by that
//! group's strategy.

use hashbrown::HashMap;
use log::{debug, warn};
use slotmap::{SecondaryMap, SlotMap};

use crate::config::{Config, DuplicatePolicy};
use crate::element::{AnimatedElement, ElementDecl};
use crate::error::AnimationError;
use crate::group::AnimatedGroup;
use crate::ids::{ElementKey, GroupKey};
use crate::layout::{validate_dimensions, LayoutStrategy};
use crate::outputs::FrameSnapshotEntry;
use crate::time::Timestamp;
use crate::value::Channel;

/// Apply `layout` to copies of `keys` and write them back only on success,
/// so a failed application leaves every element as it was.
fn apply_atomic(
    elements: &mut SlotMap<ElementKey, AnimatedElement>,
    keys: &[ElementKey],
    layout: &mut dyn LayoutStrategy,
    now: Timestamp,
    laid_out: &mut Vec<ElementKey>,
) -> Result<(), AnimationError> {
    let live: Vec<ElementKey> = keys
        .iter()
        .copied()
        .filter(|k| elements.contains_key(*k))
        .collect();
    let mut batch: Vec<AnimatedElement> = live
        .iter()
        .map(|k| {
            let mut el = elements[*k].clone();
            el.begin_application();
            el
        })
        .collect();
    layout.apply(&mut batch, now)?;
    for (key, el) in live.iter().zip(batch) {
        elements[*key] = el;
    }
    *laid_out = live;
    Ok(())
}

#[derive(Debug)]
pub struct Engine {
    cfg: Config,
    elements: SlotMap<ElementKey, AnimatedElement>,
    by_id: HashMap<String, ElementKey>,
    membership: SecondaryMap<ElementKey, GroupKey>,
    ungrouped: Vec<ElementKey>,
    groups: SlotMap<GroupKey, AnimatedGroup>,
    group_order: Vec<GroupKey>,
    groups_by_name: HashMap<String, GroupKey>,
    layout: Option<Box<dyn LayoutStrategy>>,
    laid_out: Vec<ElementKey>,
    max_displayed_items: Option<usize>,
    dimensions: Option<(f64, f64)>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Engine {
    pub fn new(cfg: Config) -> Self {
        let max_displayed_items = cfg.max_displayed_items;
        Self {
            cfg,
            elements: SlotMap::with_key(),
            by_id: HashMap::new(),
            membership: SecondaryMap::new(),
            ungrouped: Vec::new(),
            groups: SlotMap::with_key(),
            group_order: Vec::new(),
            groups_by_name: HashMap::new(),
            layout: None,
            laid_out: Vec::new(),
            max_displayed_items,
            dimensions: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    // ---------- Elements ----------

    fn check_duplicate(&self, id: &str) -> Result<Option<ElementKey>, AnimationError> {
        match self.by_id.get(id) {
            None => Ok(None),
            Some(key) => match self.cfg.duplicate_policy {
                DuplicatePolicy::Collapse => {
                    debug!("engine: '{id}' already registered, keeping existing");
                    Ok(Some(*key))
                }
                DuplicatePolicy::Reject => Err(AnimationError::DuplicateId { id: id.to_string() }),
            },
        }
    }

    fn insert(&mut self, decl: ElementDecl) -> Result<ElementKey, AnimationError> {
        let element = AnimatedElement::from_decl(decl)?;
        let id = element.id().to_string();
        let key = self.elements.insert(element);
        self.by_id.insert(id, key);
        Ok(key)
    }

    /// Register an ungrouped element.
    pub fn register(&mut self, decl: ElementDecl) -> Result<ElementKey, AnimationError> {
        if let Some(key) = self.check_duplicate(&decl.id)? {
            return Ok(key);
        }
        let key = self.insert(decl)?;
        self.ungrouped.push(key);
        debug!("engine: registered '{}'", self.elements[key].id());
        Ok(key)
    }

    /// Register an element directly into the named group.
    pub fn register_in_group(
        &mut self,
        group: &str,
        decl: ElementDecl,
    ) -> Result<ElementKey, AnimationError> {
        let gkey = self.group_key(group)?;
        if let Some(key) = self.check_duplicate(&decl.id)? {
            return Ok(key);
        }
        let key = self.insert(decl)?;
        self.groups[gkey].push(key);
        self.membership.insert(key, gkey);
        debug!("engine: registered '{}' in group '{group}'", self.elements[key].id());
        Ok(key)
    }

    /// Take `key` out of whichever collection holds it.
    fn detach(&mut self, key: ElementKey) {
        match self.membership.remove(key) {
            Some(gkey) => {
                if let Some(group) = self.groups.get_mut(gkey) {
                    group.remove(key);
                }
            }
            None => {
                self.ungrouped.retain(|k| *k != key);
                self.laid_out.retain(|k| *k != key);
            }
        }
    }

    /// Remove an element wherever it lives. Unknown ids are ignored.
    pub fn unregister(&mut self, id: &str) -> Option<AnimatedElement> {
        let key = self.by_id.remove(id)?;
        self.detach(key);
        debug!("engine: unregistered '{id}'");
        self.elements.remove(key)
    }

    pub fn add_to_group(&mut self, group: &str, id: &str) -> Result<(), AnimationError> {
        let gkey = self.group_key(group)?;
        let Some(key) = self.by_id.get(id).copied() else {
            return Ok(());
        };
        if self.membership.get(key) == Some(&gkey) {
            return Ok(());
        }
        self.detach(key);
        self.groups[gkey].push(key);
        self.membership.insert(key, gkey);
        debug!("engine: moved '{id}' into group '{group}'");
        Ok(())
    }

    /// Move an element out of `group` back to the ungrouped list. A no-op
    /// when the element is not a member.
    pub fn remove_from_group(&mut self, group: &str, id: &str) {
        let (Some(gkey), Some(key)) = (
            self.groups_by_name.get(group).copied(),
            self.by_id.get(id).copied(),
        ) else {
            return;
        };
        if self.membership.get(key) != Some(&gkey) {
            return;
        }
        self.detach(key);
        self.ungrouped.push(key);
        debug!("engine: moved '{id}' out of group '{group}'");
    }

    pub fn set_static(&mut self, id: &str, channel: Channel, value: f64) -> Result<(), AnimationError> {
        match self.by_id.get(id) {
            Some(key) => self.elements[*key].set_static(channel, value),
            None => Ok(()),
        }
    }

    pub fn element(&self, id: &str) -> Option<&AnimatedElement> {
        self.by_id.get(id).map(|k| &self.elements[*k])
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut AnimatedElement> {
        let key = *self.by_id.get(id)?;
        self.elements.get_mut(key)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Number of registered elements, grouped or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Ids of ungrouped elements in registration order.
    pub fn ungrouped_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.ungrouped.iter().map(|k| self.elements[*k].id())
    }

    // ---------- Groups ----------

    fn group_key(&self, name: &str) -> Result<GroupKey, AnimationError> {
        self.groups_by_name
            .get(name)
            .copied()
            .ok_or_else(|| AnimationError::GroupNotFound {
                name: name.to_string(),
            })
    }

    /// Register a group. Members already listed on `group` are ignored; add
    /// elements with `register_in_group` or `add_to_group`.
    pub fn register_group(&mut self, mut group: AnimatedGroup) -> Result<GroupKey, AnimationError> {
        if let Some(existing) = self.groups_by_name.get(group.name()) {
            return match self.cfg.duplicate_policy {
                DuplicatePolicy::Collapse => Ok(*existing),
                DuplicatePolicy::Reject => Err(AnimationError::DuplicateId {
                    id: group.name().to_string(),
                }),
            };
        }
        for key in group.take_members() {
            debug!("engine: dropping foreign member {key:?} of group '{}'", group.name());
        }
        group.inherit_max_displayed_items(self.max_displayed_items);
        if let (Some((w, h)), Some(layout)) = (self.dimensions, group.layout_mut()) {
            layout.set_dimensions(w, h)?;
        }
        let name = group.name().to_string();
        let gkey = self.groups.insert(group);
        self.group_order.push(gkey);
        self.groups_by_name.insert(name.clone(), gkey);
        debug!("engine: registered group '{name}'");
        Ok(gkey)
    }

    /// Remove a group, disposing its strategy and its member elements.
    pub fn unregister_group(&mut self, name: &str) -> Option<AnimatedGroup> {
        let gkey = self.groups_by_name.remove(name)?;
        self.group_order.retain(|k| *k != gkey);
        let mut group = self.groups.remove(gkey)?;
        for key in group.take_members() {
            self.membership.remove(key);
            if let Some(el) = self.elements.remove(key) {
                self.by_id.remove(el.id());
            }
        }
        if let Some(mut layout) = group.set_layout(None) {
            layout.dispose();
        }
        debug!("engine: unregistered group '{name}'");
        Some(group)
    }

    pub fn group(&self, name: &str) -> Option<&AnimatedGroup> {
        self.groups_by_name.get(name).map(|k| &self.groups[*k])
    }

    pub fn group_mut(&mut self, name: &str) -> Option<&mut AnimatedGroup> {
        let key = *self.groups_by_name.get(name)?;
        self.groups.get_mut(key)
    }

    /// Ids of a group's members in order.
    pub fn group_member_ids(&self, name: &str) -> Vec<&str> {
        self.group(name)
            .map(|g| g.members().iter().map(|k| self.elements[*k].id()).collect())
            .unwrap_or_default()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    // ---------- Layout ----------

    pub fn layout(&self) -> Option<&dyn LayoutStrategy> {
        self.layout.as_deref()
    }

    pub fn layout_mut(&mut self) -> Option<&mut (dyn LayoutStrategy + 'static)> {
        self.layout.as_deref_mut()
    }

    /// Replace the engine strategy; the previous one is disposed. `None`
    /// leaves elements frozen on their current motions.
    pub fn set_layout(
        &mut self,
        layout: Option<Box<dyn LayoutStrategy>>,
    ) -> Result<(), AnimationError> {
        let mut layout = layout;
        if let (Some((w, h)), Some(l)) = (self.dimensions, layout.as_mut()) {
            l.set_dimensions(w, h)?;
        }
        if let Some(mut old) = std::mem::replace(&mut self.layout, layout) {
            debug!("engine: disposing layout '{}'", old.name());
            old.dispose();
        }
        self.laid_out.clear();
        Ok(())
    }

    /// Replace a group's strategy. Unknown groups are ignored.
    pub fn set_group_layout(
        &mut self,
        group: &str,
        layout: Option<Box<dyn LayoutStrategy>>,
    ) -> Result<(), AnimationError> {
        let dims = self.dimensions;
        let Some(g) = self.group_mut(group) else {
            debug!("engine: set_group_layout on unknown group '{group}'");
            return Ok(());
        };
        let mut layout = layout;
        if let (Some((w, h)), Some(l)) = (dims, layout.as_mut()) {
            l.set_dimensions(w, h)?;
        }
        if let Some(mut old) = g.set_layout(layout) {
            old.dispose();
        }
        g.laid_out.clear();
        Ok(())
    }

    /// Container size, handed to every strategy.
    pub fn set_dimensions(&mut self, width: f64, height: f64) -> Result<(), AnimationError> {
        validate_dimensions(width, height)?;
        self.dimensions = Some((width, height));
        if let Some(layout) = self.layout.as_mut() {
            layout.set_dimensions(width, height)?;
        }
        for group in self.groups.values_mut() {
            if let Some(layout) = group.layout_mut() {
                layout.set_dimensions(width, height)?;
            }
        }
        Ok(())
    }

    #[inline]
    pub fn max_displayed_items(&self) -> Option<usize> {
        self.max_displayed_items
    }

    /// Cap the ungrouped elements considered by the layout, and every group
    /// without a cap of its own.
    pub fn set_max_displayed_items(&mut self, cap: Option<usize>) {
        self.max_displayed_items = cap;
        for group in self.groups.values_mut() {
            group.inherit_max_displayed_items(cap);
        }
    }

    fn displayed_ungrouped(&self) -> Vec<ElementKey> {
        let n = self
            .max_displayed_items
            .map_or(self.ungrouped.len(), |cap| cap.min(self.ungrouped.len()));
        self.ungrouped[..n].to_vec()
    }

    /// Run every strategy at `now`. A failing strategy leaves its elements
    /// untouched while the others still apply; the first error is returned.
    pub fn apply_layout(&mut self, now: Timestamp) -> Result<(), AnimationError> {
        let mut first_err = None;

        let keys = self.displayed_ungrouped();
        if let Some(layout) = self.layout.as_deref_mut() {
            debug!("engine: applying '{}' to {} elements", layout.name(), keys.len());
            if let Err(e) = apply_atomic(&mut self.elements, &keys, &mut *layout, now, &mut self.laid_out) {
                warn!("engine: layout '{}' failed: {e}", layout.name());
                first_err.get_or_insert(e);
            }
        }

        for gkey in &self.group_order {
            let Some(group) = self.groups.get_mut(*gkey) else {
                continue;
            };
            let name = group.name().to_string();
            let (layout, members, laid_out) = group.parts_mut();
            let Some(layout) = layout else {
                continue;
            };
            debug!("engine: applying '{}' to group '{name}'", layout.name());
            if let Err(e) = apply_atomic(&mut self.elements, members, &mut *layout, now, laid_out) {
                warn!("engine: layout '{}' failed on group '{name}': {e}", layout.name());
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Stamp `now` as the origin of every strategy and restart the motions
    /// each one wrote in its last application.
    pub fn apply_start_time(&mut self, now: Timestamp) {
        if let Some(layout) = self.layout.as_mut() {
            layout.apply_start_time(now);
            for key in &self.laid_out {
                if let Some(el) = self.elements.get_mut(*key) {
                    el.rebase(now);
                }
            }
        }
        for group in self.groups.values_mut() {
            let (layout, _, laid_out) = group.parts_mut();
            if let Some(layout) = layout {
                layout.apply_start_time(now);
                for key in laid_out.iter() {
                    if let Some(el) = self.elements.get_mut(*key) {
                        el.rebase(now);
                    }
                }
            }
        }
    }

    /// Advance the engine strategy when it is composite.
    pub fn next_layout(&mut self) -> bool {
        self.layout.as_mut().is_some_and(|l| l.next_layout())
    }

    // ---------- Frames ----------

    /// One sparse entry per registered element: ungrouped elements first,
    /// then each group's members in group registration order.
    pub fn update(&self, now: Timestamp) -> Vec<FrameSnapshotEntry> {
        let mut out = Vec::with_capacity(self.elements.len());
        out.extend(self.ungrouped.iter().map(|k| self.elements[*k].snapshot(now)));
        for gkey in &self.group_order {
            if let Some(group) = self.groups.get(*gkey) {
                out.extend(group.members().iter().map(|k| self.elements[*k].snapshot(now)));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{StackLayout, StackParams};
    use crate::state::Timing;

    #[test]
    fn membership_is_exclusive() {
        let mut engine = Engine::default();
        engine.register(ElementDecl::new("a")).unwrap();
        engine.register_group(AnimatedGroup::new("g1")).unwrap();
        engine.register_group(AnimatedGroup::new("g2")).unwrap();
        engine.add_to_group("g1", "a").unwrap();
        engine.add_to_group("g2", "a").unwrap();
        assert!(engine.group_member_ids("g1").is_empty());
        assert_eq!(engine.group_member_ids("g2"), vec!["a"]);
        assert_eq!(engine.ungrouped_ids().count(), 0);
        engine.remove_from_group("g2", "a");
        assert_eq!(engine.ungrouped_ids().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn add_to_unknown_group_fails() {
        let mut engine = Engine::default();
        engine.register(ElementDecl::new("a")).unwrap();
        let err = engine.add_to_group("nope", "a").unwrap_err();
        assert_eq!(err.category(), "registry");
    }

    #[test]
    fn unregister_group_disposes_members() {
        let mut engine = Engine::default();
        engine.register_group(AnimatedGroup::new("g")).unwrap();
        engine.register_in_group("g", ElementDecl::new("x")).unwrap();
        engine.register(ElementDecl::new("y")).unwrap();
        assert!(engine.unregister_group("g").is_some());
        assert!(!engine.contains("x"));
        assert!(engine.contains("y"));
        assert!(engine.unregister_group("g").is_none());
    }

    #[test]
    fn clearing_layout_freezes_elements() {
        let mut engine = Engine::default();
        engine.set_dimensions(100.0, 100.0).unwrap();
        engine.register(ElementDecl::new("a")).unwrap();
        engine
            .set_layout(Some(Box::new(StackLayout::new(
                StackParams::default(),
                Timing::default(),
            ))))
            .unwrap();
        engine.apply_layout(Timestamp::zero()).unwrap();
        let before = engine.update(Timestamp::from_millis(200.0));
        engine.set_layout(None).unwrap();
        engine.apply_layout(Timestamp::from_millis(200.0)).unwrap();
        assert_eq!(engine.update(Timestamp::from_millis(200.0)), before);
    }
}
