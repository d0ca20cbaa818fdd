//! Identifiers for arena-owned entities.
//!
//! Elements and groups live in generational arenas owned by the engine.
//! Everything else (group member lists, the ungrouped list, layouts) refers to
//! them through these keys, never through references. Host-facing identity is
//! the string id chosen by the declaring component; the engine never invents
//! one.

use slotmap::new_key_type;

new_key_type! {
    /// Handle to an element slot in the engine arena.
    pub struct ElementKey;
    /// Handle to a group slot in the engine arena.
    pub struct GroupKey;
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn stale_keys_do_not_alias() {
        let mut arena: SlotMap<ElementKey, &str> = SlotMap::with_key();
        let a = arena.insert("a");
        arena.remove(a);
        let b = arena.insert("b");
        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(b), Some(&"b"));
    }
}
