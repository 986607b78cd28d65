//! Selection set of element indices.

use std::collections::BTreeSet;

/// The set of selected element indices.
///
/// Indices are kept ordered so iteration (and therefore handle hit testing)
/// is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    indices: BTreeSet<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle `index`. Without `additive` the selection is cleared first, so
    /// the index always ends up as the only member.
    pub fn toggle(&mut self, index: usize, additive: bool) {
        if !additive {
            self.indices.clear();
        }
        if !self.indices.remove(&index) {
            self.indices.insert(index);
        }
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indices.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Selected indices in ascending order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = usize> + '_ {
        self.indices.iter().copied()
    }

    /// Copy of the current selection, for restoring later.
    pub fn snapshot(&self) -> Selection {
        self.clone()
    }

    pub fn restore(&mut self, snapshot: Selection) {
        *self = snapshot;
    }
}

impl FromIterator<usize> for Selection {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self {
            indices: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusive_toggle_replaces() {
        let mut selection = Selection::from_iter([1, 2]);
        selection.toggle(3, false);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_exclusive_toggle_of_member_keeps_it() {
        let mut selection = Selection::from_iter([0, 4]);
        selection.toggle(4, false);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_additive_toggle() {
        let mut selection = Selection::new();
        selection.toggle(2, true);
        selection.toggle(0, true);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0, 2]);

        selection.toggle(2, true);
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut selection = Selection::from_iter([1]);
        let saved = selection.snapshot();
        selection.clear();
        assert!(selection.is_empty());
        selection.restore(saved);
        assert!(selection.contains(1));
    }
}
