//! Filesystem probing for folder watchers
//!
//! A small seam between a folder registry and the disk. The registry only needs
//! two things: whether a directory exists, and the list of every directory below
//! a root in breadth-first order.
//!
//! # Example
//!
//! ```
//! use fsprobe::{FakeFileSystem, FileSystemProbe};
//! use std::path::{Path, PathBuf};
//!
//! let fs = FakeFileSystem::new();
//! fs.create("/root");
//! fs.create("/root/sub");
//! fs.create("/root/sub/deep");
//!
//! assert!(fs.exists(Path::new("/root/sub")));
//!
//! let folders = fs.enumerate_recursive(Path::new("/root"))?;
//! assert_eq!(
//!     folders,
//!     vec![
//!         PathBuf::from("/root"),
//!         PathBuf::from("/root/sub"),
//!         PathBuf::from("/root/sub/deep"),
//!     ]
//! );
//! # Ok::<(), fsprobe::Error>(())
//! ```

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors that can occur while probing the filesystem
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not a directory: '{}'", .0.display())]
    NotADirectory(PathBuf),

    #[error("Failed to read directory '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for probe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Directory existence and enumeration
///
/// Implementations must list `root` first, followed by its descendants in
/// breadth-first order.
pub trait FileSystemProbe: Send + Sync {
    /// Whether `path` exists and is a directory
    fn exists(&self, path: &Path) -> bool;

    /// Every directory at or below `root`, root first, shallow before deep
    fn enumerate_recursive(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

impl<T: FileSystemProbe + ?Sized> FileSystemProbe for Arc<T> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn enumerate_recursive(&self, root: &Path) -> Result<Vec<PathBuf>> {
        (**self).enumerate_recursive(root)
    }
}

impl<T: FileSystemProbe + ?Sized> FileSystemProbe for Box<T> {
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn enumerate_recursive(&self, root: &Path) -> Result<Vec<PathBuf>> {
        (**self).enumerate_recursive(root)
    }
}

/// Probe backed by the real filesystem
///
/// Siblings are listed in file-name order so repeated scans of an unchanged
/// tree produce the same sequence. Symlinked directories are not followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }

    /// Immediate subdirectories of `dir`, sorted by name
    fn subdirectories(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                children.push(entry.path());
            }
        }
        children.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(children)
    }
}

impl FileSystemProbe for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn enumerate_recursive(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(Error::NotADirectory(root.to_path_buf()));
        }

        let mut folders = vec![root.to_path_buf()];
        let mut queue = VecDeque::new();

        // An unreadable root is fatal; unreadable descendants are skipped.
        let children = Self::subdirectories(root).map_err(|source| Error::Io {
            path: root.to_path_buf(),
            source,
        })?;
        queue.extend(children);

        while let Some(dir) = queue.pop_front() {
            match Self::subdirectories(&dir) {
                Ok(children) => queue.extend(children),
                Err(e) => {
                    tracing::warn!(path = %dir.display(), error = %e, "Skipping unreadable folder");
                }
            }
            folders.push(dir);
        }

        Ok(folders)
    }
}

/// In-memory probe for tests
///
/// Clones share the same tree, so a test can keep one handle while a
/// registry owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeFileSystem {
    folders: Arc<RwLock<Vec<PathBuf>>>,
}

impl FakeFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a folder (no-op if it already exists)
    pub fn create(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut folders = self.folders.write().unwrap_or_else(|e| e.into_inner());
        if !folders.contains(&path) {
            folders.push(path);
        }
    }

    /// Delete a folder and everything below it
    pub fn delete(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut folders = self.folders.write().unwrap_or_else(|e| e.into_inner());
        folders.retain(|f| !f.starts_with(path));
    }

    /// Number of folders currently present
    pub fn len(&self) -> usize {
        self.folders.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FileSystemProbe for FakeFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let folders = self.folders.read().unwrap_or_else(|e| e.into_inner());
        folders.iter().any(|f| f == path)
    }

    fn enumerate_recursive(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let folders = self.folders.read().unwrap_or_else(|e| e.into_inner());
        if !folders.iter().any(|f| f == root) {
            return Err(Error::NotADirectory(root.to_path_buf()));
        }

        let mut result = Vec::new();
        let mut queue = VecDeque::from([root.to_path_buf()]);
        while let Some(dir) = queue.pop_front() {
            queue.extend(
                folders
                    .iter()
                    .filter(|f| f.parent() == Some(dir.as_path()))
                    .cloned(),
            );
            result.push(dir);
        }
        Ok(result)
    }
}
