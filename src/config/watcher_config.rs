//! folderwatch configuration file handling

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// folderwatch configuration
///
/// Represents the ~/.config/folderwatch/config.yaml file. Every field has a
/// default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Folder to watch when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Capacity of the watch event broadcast channel
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,

    /// Capacity of the watch command queue
    #[serde(default = "default_command_channel_capacity")]
    pub command_channel_capacity: usize,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_event_channel_capacity() -> usize {
    256
}

fn default_command_channel_capacity() -> usize {
    64
}

fn default_log_filter() -> String {
    crate::logging::DEFAULT_FILTER.to_string()
}

impl WatcherConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            root: None,
            event_channel_capacity: default_event_channel_capacity(),
            command_channel_capacity: default_command_channel_capacity(),
            log_filter: default_log_filter(),
        }
    }

    /// Set the default watch root
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(crate::WatcherError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading folderwatch configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = if content.trim().is_empty() {
            Self::new()
        } else {
            serde_yaml::from_str(&content)?
        };

        tracing::debug!(
            root = ?config.root,
            event_channel_capacity = config.event_channel_capacity,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Ok(Self::new())
        }
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving folderwatch configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/folderwatch/config.yaml)
    pub fn default_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("folderwatch");
        path.push("config.yaml");
        path
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_config_defaults() {
        let config = WatcherConfig::new();
        assert_eq!(config.root, None);
        assert_eq!(config.event_channel_capacity, 256);
        assert_eq!(config.command_channel_capacity, 64);
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        let mut config = WatcherConfig::new().with_root("/projects/app");
        config.command_channel_capacity = 8;
        config.save(path).unwrap();

        let loaded = WatcherConfig::load(path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "root: /srv/code\n").unwrap();

        let loaded = WatcherConfig::load(&path).unwrap();
        assert_eq!(loaded.root, Some(PathBuf::from("/srv/code")));
        assert_eq!(loaded.command_channel_capacity, 64);
        assert_eq!(loaded.log_filter, "warn");
    }

    #[test]
    fn test_empty_file_is_default() {
        let temp_file = NamedTempFile::new().unwrap();
        let loaded = WatcherConfig::load(temp_file.path()).unwrap();
        assert_eq!(loaded, WatcherConfig::new());
    }

    #[test]
    fn test_load_missing_file() {
        let result = WatcherConfig::load("/nonexistent/config.yaml");
        assert!(matches!(result, Err(crate::WatcherError::Config(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = WatcherConfig::load_or_default(temp_dir.path().join("none.yaml")).unwrap();
        assert_eq!(config, WatcherConfig::new());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested/dir/config.yaml");

        WatcherConfig::new().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_default_path() {
        let path = WatcherConfig::default_path();
        assert!(path.ends_with("folderwatch/config.yaml"));
    }
}
