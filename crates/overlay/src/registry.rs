//! Process-wide list of open menus used by the eviction policy.

use std::collections::VecDeque;
use std::fmt;

/// Identity of a mounted dropdown. Unique per [`crate::Coordinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dropdown-{}", self.0)
    }
}

/// Anything the registry can hold.
pub trait Tracked {
    fn overlay_id(&self) -> OverlayId;
}

impl Tracked for OverlayId {
    fn overlay_id(&self) -> OverlayId {
        *self
    }
}

/// Ordered open menus, oldest first.
///
/// The registry never closes anything itself: eviction hands the removed
/// entries back and the caller runs each one's own close action.
#[derive(Debug)]
pub struct OpenInstanceRegistry<H> {
    entries: VecDeque<H>,
}

impl<H> Default for OpenInstanceRegistry<H> {
    fn default() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }
}

impl<H: Tracked> OpenInstanceRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &H> {
        self.entries.iter()
    }

    pub fn ids(&self) -> Vec<OverlayId> {
        self.entries.iter().map(Tracked::overlay_id).collect()
    }

    pub fn contains(&self, id: OverlayId) -> bool {
        self.entries.iter().any(|e| e.overlay_id() == id)
    }

    /// Append as the newest entry. An entry already present is moved to the back.
    pub fn register(&mut self, handle: H) {
        let id = handle.overlay_id();
        self.entries.retain(|e| e.overlay_id() != id);
        self.entries.push_back(handle);
    }

    pub fn remove(&mut self, id: OverlayId) -> Option<H> {
        let idx = self.entries.iter().position(|e| e.overlay_id() == id)?;
        self.entries.remove(idx)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Drop oldest entries until at most `limit` remain; returns them oldest first.
    pub fn evict_oldest_beyond(&mut self, limit: usize) -> Vec<H> {
        self.evict_oldest_beyond_except(limit, |_| false)
    }

    /// Like [`Self::evict_oldest_beyond`], but entries for which `keep`
    /// returns true are passed over and the next oldest goes instead.
    /// Stops early, above `limit`, once only kept entries are left.
    pub fn evict_oldest_beyond_except(
        &mut self,
        limit: usize,
        keep: impl Fn(&H) -> bool,
    ) -> Vec<H> {
        let mut evicted = Vec::new();
        while self.entries.len() > limit {
            let Some(idx) = self.entries.iter().position(|e| !keep(e)) else {
                break;
            };
            if let Some(entry) = self.entries.remove(idx) {
                evicted.push(entry);
            }
        }
        evicted
    }

    /// Record an open in a constrained layout.
    ///
    /// A menu not nested in any tracked panel starts a fresh interaction and
    /// resets the list. Entries for which `is_ancestor` holds host the new
    /// menu and are never evicted for it, and neither is the new entry.
    /// The caller must close every returned handle.
    pub fn track_open(
        &mut self,
        handle: H,
        nested: bool,
        limit: usize,
        is_ancestor: impl Fn(&H) -> bool,
    ) -> Vec<H> {
        if !nested {
            self.clear();
        }
        let id = handle.overlay_id();
        self.register(handle);
        self.evict_oldest_beyond_except(limit, |e| e.overlay_id() == id || is_ancestor(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: u64) -> OverlayId {
        OverlayId(n)
    }

    fn no_ancestor(_: &OverlayId) -> bool {
        false
    }

    #[test]
    fn eviction_is_oldest_first() {
        let mut registry = OpenInstanceRegistry::new();
        for n in 1..=5 {
            registry.register(id(n));
        }
        let evicted = registry.evict_oldest_beyond(2);
        assert_eq!(evicted, vec![id(1), id(2), id(3)]);
        assert_eq!(registry.ids(), vec![id(4), id(5)]);
        assert!(registry.evict_oldest_beyond(2).is_empty());
    }

    #[test]
    fn nested_opens_accumulate_until_the_limit() {
        let mut registry = OpenInstanceRegistry::new();
        assert!(registry.track_open(id(1), false, 2, no_ancestor).is_empty());
        assert!(registry.track_open(id(2), true, 2, no_ancestor).is_empty());
        assert_eq!(registry.track_open(id(3), true, 2, no_ancestor), vec![id(1)]);
        assert_eq!(registry.track_open(id(4), true, 2, no_ancestor), vec![id(2)]);
        assert_eq!(registry.ids(), vec![id(3), id(4)]);
    }

    #[test]
    fn ancestors_of_the_new_entry_are_skipped() {
        let mut registry = OpenInstanceRegistry::new();
        let parent = id(1);
        let is_parent = |e: &OverlayId| *e == parent;
        registry.track_open(parent, false, 2, is_parent);
        registry.track_open(id(2), true, 2, is_parent);
        assert_eq!(registry.track_open(id(3), true, 2, is_parent), vec![id(2)]);
        assert_eq!(registry.ids(), vec![id(1), id(3)]);
    }

    #[test]
    fn only_kept_entries_left_stops_eviction() {
        let mut registry = OpenInstanceRegistry::new();
        for n in 1..=3 {
            registry.register(id(n));
        }
        let evicted = registry.evict_oldest_beyond_except(1, |e| e.0 != 2);
        assert_eq!(evicted, vec![id(2)]);
        assert_eq!(registry.ids(), vec![id(1), id(3)]);
    }

    #[test]
    fn top_level_open_resets_the_interaction() {
        let mut registry = OpenInstanceRegistry::new();
        registry.track_open(id(1), false, 2, no_ancestor);
        registry.track_open(id(2), true, 2, no_ancestor);
        let evicted = registry.track_open(id(7), false, 2, no_ancestor);
        assert!(evicted.is_empty());
        assert_eq!(registry.ids(), vec![id(7)]);
    }

    #[test]
    fn reregistering_moves_entry_to_the_back() {
        let mut registry = OpenInstanceRegistry::new();
        registry.register(id(1));
        registry.register(id(2));
        registry.register(id(1));
        assert_eq!(registry.ids(), vec![id(2), id(1)]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn remove_is_a_noop_for_unknown_ids() {
        let mut registry = OpenInstanceRegistry::new();
        registry.register(id(1));
        assert!(registry.remove(id(9)).is_none());
        assert_eq!(registry.remove(id(1)), Some(id(1)));
        assert!(registry.is_empty());
    }
}
