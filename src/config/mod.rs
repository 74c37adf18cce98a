//! Configuration system
//!
//! Loads ~/.config/folderwatch/config.yaml with support for:
//! - A default watch root
//! - Channel capacities for the watch loop
//! - Default log filter

mod validation;
mod watcher_config;

pub use validation::{validate_config, validate_config_result, ValidationError};
pub use watcher_config::WatcherConfig;
