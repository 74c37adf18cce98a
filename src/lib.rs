//! folderwatch - Folder watch state tracking for continuous test runners
//!
//! Keeps the authoritative record of which folders a runner observes, which of
//! them the user has ignored, and reconciles that record with folder creation
//! and deletion notifications and full rescans of a root directory.
//!
//! # Architecture
//!
//! - **watcher**: The ordered watch set and the `FolderRegistry` operating on it
//! - **dispatch**: A tokio loop that serializes commands onto one registry
//! - **config**: YAML configuration (~/.config/folderwatch/config.yaml)
//! - **logging**: tracing subscriber setup
//!
//! Filesystem access goes through the [`fsprobe`] crate, so tests can swap in
//! an in-memory tree.
//!
//! # Example
//!
//! ```
//! use folderwatch::watcher::FolderRegistry;
//! use fsprobe::FakeFileSystem;
//!
//! let fs = FakeFileSystem::new();
//! fs.create("/root");
//! fs.create("/root/sub");
//!
//! let registry = FolderRegistry::new(fs);
//! registry.adjust("/root")?;
//! registry.ignore("/root/sub");
//!
//! assert!(registry.is_active("/root"));
//! assert!(registry.is_ignored("/root/sub"));
//! # Ok::<(), folderwatch::WatcherError>(())
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod watcher;

// Re-exports
pub use error::{Result, WatcherError};
pub use watcher::{FolderRegistry, FolderState, WatchedFolder};
