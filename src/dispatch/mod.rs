//! Sequential dispatch of watch commands
//!
//! Filesystem notifications and user requests arrive from different places;
//! the watch loop funnels them through one queue so the registry only ever
//! sees one mutation at a time, and broadcasts what actually changed.

mod watch_loop;

pub use watch_loop::{CommandResult, WatchHandle, WatchLoop};

use crate::{Result, WatcherError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Commands accepted by the watch loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchCommand {
    /// Point at a (new) root and rescan it
    Adjust(PathBuf),
    /// A folder appeared on disk
    Created(PathBuf),
    /// A folder disappeared from disk
    Deleted(PathBuf),
    /// The user excluded a folder
    Ignore(PathBuf),
    /// The user brought an excluded folder back
    Reinstate(PathBuf),
    /// Stop the loop
    Shutdown,
}

/// Changes broadcast by the watch loop
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WatchEvent {
    /// The watch set was rebuilt from `root`
    Adjusted { root: PathBuf, folders: usize },
    FolderAdded { path: PathBuf },
    FolderRemoved { path: PathBuf },
    FolderIgnored { path: PathBuf },
    FolderReinstated { path: PathBuf },
    /// A command failed; the registry is unchanged
    Error { message: String },
    Stopped,
}

impl WatchCommand {
    /// Rewrite the folder path carried by this command
    pub fn map_path(self, f: impl FnOnce(PathBuf) -> PathBuf) -> Self {
        match self {
            Self::Adjust(path) => Self::Adjust(f(path)),
            Self::Created(path) => Self::Created(f(path)),
            Self::Deleted(path) => Self::Deleted(f(path)),
            Self::Ignore(path) => Self::Ignore(f(path)),
            Self::Reinstate(path) => Self::Reinstate(f(path)),
            Self::Shutdown => Self::Shutdown,
        }
    }

    /// Same command with its path in canonical form, see [`resolve_path`]
    pub fn resolved(self) -> Self {
        self.map_path(|path| resolve_path(&path))
    }
}

/// Canonical form of a folder path as the registry keys it
///
/// Symlinks and relative segments are resolved. A path that no longer exists
/// (a deleted folder) is resolved through its parent. Anything else is
/// returned unchanged.
pub fn resolve_path(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }

    let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
        return path.to_path_buf();
    };
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };
    match std::fs::canonicalize(parent) {
        Ok(parent) => parent.join(name),
        Err(_) => path.to_path_buf(),
    }
}

impl FromStr for WatchCommand {
    type Err = WatcherError;

    /// Parse a `<verb> <path>` line such as `ignore /src/vendor`
    ///
    /// Everything after the verb is the path, so paths may contain spaces.
    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let path = || {
            if rest.is_empty() {
                Err(WatcherError::Other(format!("'{}' needs a folder path", verb)))
            } else {
                Ok(PathBuf::from(rest))
            }
        };

        match verb.to_lowercase().as_str() {
            "adjust" | "root" => Ok(Self::Adjust(path()?)),
            "create" | "created" => Ok(Self::Created(path()?)),
            "delete" | "deleted" => Ok(Self::Deleted(path()?)),
            "ignore" => Ok(Self::Ignore(path()?)),
            "reinstate" => Ok(Self::Reinstate(path()?)),
            "shutdown" | "quit" | "exit" => Ok(Self::Shutdown),
            other => Err(WatcherError::Other(format!("Unknown command: {}", other))),
        }
    }
}
