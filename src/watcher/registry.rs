//! The folder registry
//!
//! Single source of truth for the folders a runner observes. Every mutation is
//! total except [`FolderRegistry::adjust`], and stale or speculative requests
//! (deleting an unknown folder, reinstating one that was already removed) are
//! silent no-ops.

use super::folder::WatchedFolder;
use super::state::FolderState;
use super::watch_set::WatchSet;
use crate::{Result, WatcherError};
use fsprobe::FileSystemProbe;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct RegistryState {
    folders: WatchSet,
    root: Option<PathBuf>,
}

/// Tracks watched folders and their active/ignored state
///
/// The probe is only consulted by [`adjust`](Self::adjust). All methods take
/// `&self`; share a registry behind an `Arc` when several tasks need it.
pub struct FolderRegistry<P: FileSystemProbe> {
    probe: P,
    state: RwLock<RegistryState>,
}

impl<P: FileSystemProbe> FolderRegistry<P> {
    /// Create an empty registry backed by `probe`
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            state: RwLock::new(RegistryState::default()),
        }
    }

    // Every critical section leaves the set consistent, so a poisoned lock
    // is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Point the registry at `root`, replacing every tracked folder
    ///
    /// The root and all of its descendant folders become active, shallow
    /// folders before deep ones. Folders tracked before the call, ignored ones
    /// included, are forgotten.
    ///
    /// # Errors
    /// [`WatcherError::PathNotFound`] if `root` is not an existing directory
    /// (also when it disappears during the scan), or [`WatcherError::Probe`]
    /// if enumeration fails. Either way the
    /// previous state is left untouched.
    pub fn adjust(&self, root: impl AsRef<Path>) -> Result<()> {
        let root = root.as_ref();

        if !self.probe.exists(root) {
            tracing::warn!(root = %root.display(), "Cannot watch missing directory");
            return Err(WatcherError::path_not_found(root));
        }

        // Enumerate before locking so readers never wait on disk I/O.
        let listing = self.probe.enumerate_recursive(root).map_err(|e| match e {
            // The root vanished after the existence check.
            fsprobe::Error::NotADirectory(_) => WatcherError::path_not_found(root),
            other => other.into(),
        })?;
        let ordered = breadth_first(root, listing);

        let mut folders = WatchSet::with_capacity(ordered.len());
        for path in ordered {
            folders.insert(path, FolderState::Active);
        }
        let count = folders.len();

        let mut state = self.write();
        let previous = state.folders.len();
        state.folders = folders;
        state.root = Some(root.to_path_buf());
        drop(state);

        tracing::info!(
            root = %root.display(),
            folders = count,
            previous,
            "Rescanned watch root"
        );
        Ok(())
    }

    /// Start watching a newly created folder
    ///
    /// The folder is appended as active. A folder that is already tracked
    /// keeps its current state, and an empty path is never tracked. Returns
    /// `true` if the folder was added.
    pub fn creation(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            tracing::debug!("Creation with empty path ignored");
            return false;
        }
        let added = self.write().folders.insert(path, FolderState::Active);
        if added {
            tracing::debug!(path = %path.display(), "Folder created");
        } else {
            tracing::trace!(path = %path.display(), "Creation of tracked folder ignored");
        }
        added
    }

    /// Stop tracking a deleted folder, whatever its state
    ///
    /// Returns `true` if the folder was tracked.
    pub fn deletion(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        match self.write().folders.remove(path) {
            Some(previous) => {
                tracing::debug!(path = %path.display(), %previous, "Folder deleted");
                true
            }
            None => false,
        }
    }

    /// Exclude an active folder
    ///
    /// No-op for untracked or already ignored folders. Returns `true` if the
    /// state changed.
    pub fn ignore(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let changed = self
            .write()
            .folders
            .transition(path, FolderState::Active, FolderState::Ignored);
        if changed {
            tracing::debug!(path = %path.display(), "Folder ignored");
        }
        changed
    }

    /// Bring an ignored folder back
    ///
    /// No-op for untracked or already active folders. Returns `true` if the
    /// state changed.
    pub fn reinstate(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        let changed = self
            .write()
            .folders
            .transition(path, FolderState::Ignored, FolderState::Active);
        if changed {
            tracing::debug!(path = %path.display(), "Folder reinstated");
        }
        changed
    }

    /// Every tracked folder, active and ignored, in watch order
    pub fn watched_folders(&self) -> Vec<WatchedFolder> {
        self.read().folders.render()
    }

    /// Active folder paths in watch order
    pub fn active_folders(&self) -> Vec<PathBuf> {
        self.read().folders.paths_in(FolderState::Active)
    }

    /// Ignored folder paths in watch order
    pub fn ignored_folders(&self) -> Vec<PathBuf> {
        self.read().folders.paths_in(FolderState::Ignored)
    }

    pub fn state_of(&self, path: impl AsRef<Path>) -> Option<FolderState> {
        self.read().folders.get(path.as_ref())
    }

    pub fn is_watched(&self, path: impl AsRef<Path>) -> bool {
        self.read().folders.contains(path.as_ref())
    }

    pub fn is_active(&self, path: impl AsRef<Path>) -> bool {
        self.state_of(path) == Some(FolderState::Active)
    }

    pub fn is_ignored(&self, path: impl AsRef<Path>) -> bool {
        self.state_of(path) == Some(FolderState::Ignored)
    }

    /// Root of the last successful rescan
    pub fn root(&self) -> Option<PathBuf> {
        self.read().root.clone()
    }

    pub fn len(&self) -> usize {
        self.read().folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().folders.is_empty()
    }
}

/// Order a probe listing shallow-before-deep under `root`
///
/// The root always comes first. Folders at equal depth keep the order the
/// probe listed them in. Duplicates and paths outside `root` are dropped.
fn breadth_first(root: &Path, listing: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = HashSet::with_capacity(listing.len() + 1);
    let mut ranked: Vec<(usize, PathBuf)> = Vec::with_capacity(listing.len() + 1);

    seen.insert(root.to_path_buf());
    ranked.push((0, root.to_path_buf()));

    for path in listing {
        let depth = match path.strip_prefix(root) {
            Ok(relative) => relative.components().count(),
            Err(_) => {
                tracing::debug!(path = %path.display(), "Skipping folder outside watch root");
                continue;
            }
        };
        if seen.insert(path.clone()) {
            ranked.push((depth, path));
        }
    }

    // Stable, so siblings keep listing order.
    ranked.sort_by_key(|(depth, _)| *depth);
    ranked.into_iter().map(|(_, path)| path).collect()
}
