//! Insertion-ordered folder map
//!
//! Pairs a `Vec` (iteration order) with a `HashMap` index (lookup), so both
//! membership checks and in-order rendering stay cheap.

use super::folder::WatchedFolder;
use super::state::FolderState;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Ordered mapping from folder path to state
#[derive(Debug, Clone, Default)]
pub struct WatchSet {
    entries: Vec<(PathBuf, FolderState)>,
    index: HashMap<PathBuf, usize>,
}

impl WatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Append `path` in `state`
    ///
    /// Returns `false` and leaves the existing entry untouched if `path` is
    /// already present.
    pub fn insert(&mut self, path: impl Into<PathBuf>, state: FolderState) -> bool {
        let path = path.into();
        if self.index.contains_key(&path) {
            return false;
        }
        self.index.insert(path.clone(), self.entries.len());
        self.entries.push((path, state));
        true
    }

    /// Remove `path`, keeping the relative order of everything else
    pub fn remove(&mut self, path: &Path) -> Option<FolderState> {
        let position = self.index.remove(path)?;
        let (_, state) = self.entries.remove(position);
        for (later, _) in &self.entries[position..] {
            if let Some(slot) = self.index.get_mut(later) {
                *slot -= 1;
            }
        }
        Some(state)
    }

    pub fn get(&self, path: &Path) -> Option<FolderState> {
        self.index.get(path).map(|&i| self.entries[i].1)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains_key(path)
    }

    /// Move `path` from `from` to `to`
    ///
    /// Returns `true` only if the entry existed and was in `from`.
    pub fn transition(&mut self, path: &Path, from: FolderState, to: FolderState) -> bool {
        match self.index.get(path) {
            Some(&i) if self.entries[i].1 == from => {
                self.entries[i].1 = to;
                true
            }
            _ => false,
        }
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Path, FolderState)> {
        self.entries.iter().map(|(p, s)| (p.as_path(), *s))
    }

    /// Render every entry in insertion order
    pub fn render(&self) -> Vec<WatchedFolder> {
        self.iter()
            .map(|(path, state)| WatchedFolder::new(path, state))
            .collect()
    }

    /// Paths in `state`, in insertion order
    pub fn paths_in(&self, state: FolderState) -> Vec<PathBuf> {
        self.iter()
            .filter(|(_, s)| *s == state)
            .map(|(p, _)| p.to_path_buf())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(set: &WatchSet) -> Vec<&Path> {
        set.iter().map(|(p, _)| p).collect()
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut set = WatchSet::new();
        set.insert("/z", FolderState::Active);
        set.insert("/a", FolderState::Active);
        set.insert("/m", FolderState::Ignored);

        assert_eq!(
            paths(&set),
            vec![Path::new("/z"), Path::new("/a"), Path::new("/m")]
        );
    }

    #[test]
    fn test_duplicate_insert_keeps_existing() {
        let mut set = WatchSet::new();
        assert!(set.insert("/a", FolderState::Ignored));
        assert!(!set.insert("/a", FolderState::Active));

        assert_eq!(set.len(), 1);
        assert_eq!(set.get(Path::new("/a")), Some(FolderState::Ignored));
    }

    #[test]
    fn test_remove_reindexes_followers() {
        let mut set = WatchSet::new();
        set.insert("/a", FolderState::Active);
        set.insert("/b", FolderState::Active);
        set.insert("/c", FolderState::Ignored);

        assert_eq!(set.remove(Path::new("/a")), Some(FolderState::Active));
        assert_eq!(set.remove(Path::new("/a")), None);

        assert_eq!(paths(&set), vec![Path::new("/b"), Path::new("/c")]);
        assert_eq!(set.get(Path::new("/c")), Some(FolderState::Ignored));
        assert!(set.transition(Path::new("/c"), FolderState::Ignored, FolderState::Active));
        assert_eq!(set.get(Path::new("/c")), Some(FolderState::Active));
    }

    #[test]
    fn test_transition_requires_matching_state() {
        let mut set = WatchSet::new();
        set.insert("/a", FolderState::Active);

        assert!(!set.transition(Path::new("/a"), FolderState::Ignored, FolderState::Active));
        assert!(!set.transition(Path::new("/missing"), FolderState::Active, FolderState::Ignored));
        assert!(set.transition(Path::new("/a"), FolderState::Active, FolderState::Ignored));
        assert_eq!(set.get(Path::new("/a")), Some(FolderState::Ignored));
    }

    #[test]
    fn test_paths_in_state() {
        let mut set = WatchSet::new();
        set.insert("/a", FolderState::Active);
        set.insert("/b", FolderState::Ignored);
        set.insert("/c", FolderState::Active);

        assert_eq!(
            set.paths_in(FolderState::Active),
            vec![PathBuf::from("/a"), PathBuf::from("/c")]
        );
        assert_eq!(set.paths_in(FolderState::Ignored), vec![PathBuf::from("/b")]);
    }
}
