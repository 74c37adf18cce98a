//! Error types for folderwatch
//!
//! Only `adjust` can fail on the registry itself; the remaining variants cover
//! configuration, logging, and output for the surrounding layers.
//! Uses thiserror for ergonomic error handling.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for folderwatch operations
pub type Result<T> = std::result::Result<T, WatcherError>;

/// Error type for folderwatch operations
#[derive(Error, Debug)]
pub enum WatcherError {
    /// The root handed to `adjust` is not an existing directory
    #[error("Directory does not exist: '{}'", .path.display())]
    PathNotFound { path: PathBuf },

    /// Folder enumeration failed part way through a rescan
    #[error("Probe error: {0}")]
    Probe(#[from] fsprobe::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),

    /// Anyhow errors (for more context)
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl WatcherError {
    /// Create a `PathNotFound` error for `path`
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        WatcherError::PathNotFound { path: path.into() }
    }

    /// Whether this error means the requested root is missing
    pub fn is_path_not_found(&self) -> bool {
        matches!(self, WatcherError::PathNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_not_found_message() {
        let err = WatcherError::path_not_found("/not/there");
        assert_eq!(err.to_string(), "Directory does not exist: '/not/there'");
        assert!(err.is_path_not_found());
    }

    #[test]
    fn test_probe_error_conversion() {
        let probe_err = fsprobe::Error::NotADirectory(PathBuf::from("/gone"));
        let err: WatcherError = probe_err.into();
        assert!(matches!(err, WatcherError::Probe(_)));
        assert!(!err.is_path_not_found());
        assert_eq!(err.to_string(), "Probe error: Not a directory: '/gone'");
    }

    #[test]
    fn test_config_error_display() {
        let err = WatcherError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad value");
    }
}
