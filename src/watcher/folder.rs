//! Rendered view of a tracked folder

use super::state::FolderState;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A tracked folder as handed to the UI layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedFolder {
    /// Absolute path to the folder
    pub path: PathBuf,

    /// Last path segment, always derived from `path`
    pub name: String,

    /// `false` when the folder is ignored
    pub active: bool,
}

impl WatchedFolder {
    /// Render a folder at `path` in the given state
    pub fn new(path: impl Into<PathBuf>, state: FolderState) -> Self {
        let path = path.into();
        Self {
            name: folder_name(&path),
            active: state.is_active(),
            path,
        }
    }

    pub fn state(&self) -> FolderState {
        FolderState::from(self.active)
    }
}

/// Final segment of `path`
///
/// Paths without one (such as `/`) fall back to the whole path so a name is
/// never empty.
pub fn folder_name(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}
