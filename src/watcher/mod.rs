//! Folder watch state tracking
//!
//! Keeps the ordered record of which folders a test runner observes and whether
//! each one is active or ignored. Rescans, creation and deletion notifications,
//! and user ignore/reinstate requests all go through [`FolderRegistry`].

mod folder;
mod registry;
mod state;
mod watch_set;

pub use folder::{folder_name, WatchedFolder};
pub use registry::FolderRegistry;
pub use state::FolderState;
pub use watch_set::WatchSet;
