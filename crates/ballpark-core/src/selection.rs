//! Row selection tracking

use indexmap::IndexSet;
use std::hash::Hash;

/// Selected row keys, in the order they were picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<K: Hash + Eq> {
    keys: IndexSet<K>,
}

impl<K: Hash + Eq> Default for Selection<K> {
    fn default() -> Self {
        Self {
            keys: IndexSet::new(),
        }
    }
}

impl<K: Hash + Eq + Clone> Selection<K> {
    /// Empty selection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the key if absent, remove it if present; returns whether it is now selected
    pub fn toggle(&mut self, key: K) -> bool {
        if self.keys.shift_remove(&key) {
            false
        } else {
            self.keys.insert(key);
            true
        }
    }

    /// Select every visible key, or clear when all of them are already selected
    pub fn toggle_all<I>(&mut self, visible: I)
    where
        I: IntoIterator<Item = K>,
    {
        let visible: IndexSet<K> = visible.into_iter().collect();
        if !visible.is_empty() && visible.iter().all(|key| self.keys.contains(key)) {
            self.keys.clear();
        } else {
            self.keys = visible;
        }
    }

    /// Whether a key is selected
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }

    /// Drop every key
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Keep only keys matching the predicate
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K) -> bool,
    {
        self.keys.retain(|key| keep(key));
    }

    /// Replace the selection
    pub fn replace<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        self.keys = keys.into_iter().collect();
    }

    /// Selected keys in selection order
    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }

    /// Owned copy of the selected keys
    #[must_use]
    pub fn to_vec(&self) -> Vec<K> {
        self.keys.iter().cloned().collect()
    }

    /// Number of selected keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut selection = Selection::new();
        assert!(selection.toggle(3));
        assert!(selection.toggle(1));
        assert_eq!(selection.to_vec(), vec![3, 1]);

        assert!(!selection.toggle(3));
        assert_eq!(selection.to_vec(), vec![1]);
    }

    #[test]
    fn test_toggle_all_selects_then_clears() {
        let mut selection = Selection::new();
        selection.toggle(99);

        selection.toggle_all([1, 2, 3]);
        assert_eq!(selection.to_vec(), vec![1, 2, 3]);

        selection.toggle_all([1, 2, 3]);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_all_with_no_visible_rows_clears() {
        let mut selection = Selection::new();
        selection.toggle(5);
        selection.toggle_all(Vec::<i32>::new());
        assert!(selection.is_empty());
    }

    #[test]
    fn test_retain_keeps_only_matching() {
        let mut selection = Selection::new();
        selection.replace([10, 11, 12, 13]);
        selection.retain(|key| key % 2 == 0);
        assert_eq!(selection.to_vec(), vec![10, 12]);
        assert!(selection.contains(&12));
        assert!(!selection.contains(&11));
    }

    proptest! {
        #[test]
        fn test_select_all_then_deselect_one(visible in prop::collection::hash_set(0i64..10_000, 1..200)) {
            let visible: Vec<i64> = visible.into_iter().collect();
            let mut selection = Selection::new();

            selection.toggle_all(visible.iter().copied());
            prop_assert_eq!(selection.len(), visible.len());

            selection.toggle(visible[0]);
            prop_assert_eq!(selection.len(), visible.len() - 1);
        }
    }
}
