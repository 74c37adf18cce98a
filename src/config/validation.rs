//! Configuration validation
//!
//! Rejects values the watch loop cannot run with:
//! - Zero channel capacities
//! - Unparseable log filter

use super::watcher_config::WatcherConfig;
use crate::WatcherError;
use tracing_subscriber::EnvFilter;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate a folderwatch configuration
pub fn validate_config(config: &WatcherConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.event_channel_capacity == 0 {
        errors.push(ValidationError::new(
            "event_channel_capacity",
            "Capacity must be greater than 0",
        ));
    }

    if config.command_channel_capacity == 0 {
        errors.push(ValidationError::new(
            "command_channel_capacity",
            "Capacity must be greater than 0",
        ));
    }

    if let Err(e) = EnvFilter::try_new(&config.log_filter) {
        errors.push(ValidationError::new(
            "log_filter",
            format!("Invalid filter '{}': {}", config.log_filter, e),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate and convert to a crate error
pub fn validate_config_result(config: &WatcherConfig) -> crate::Result<()> {
    validate_config(config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        WatcherError::Config(format!(
            "Configuration validation failed:\n  - {}",
            messages.join("\n  - ")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&WatcherConfig::new()).is_ok());
    }

    #[test]
    fn test_zero_values_rejected() {
        let mut config = WatcherConfig::new();
        config.event_channel_capacity = 0;
        config.command_channel_capacity = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "event_channel_capacity");
    }

    #[test]
    fn test_invalid_log_filter() {
        let mut config = WatcherConfig::new();
        config.log_filter = "folderwatch=notalevel".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "log_filter"));
    }

    #[test]
    fn test_validate_config_result_message() {
        let mut config = WatcherConfig::new();
        config.command_channel_capacity = 0;

        let err = validate_config_result(&config).unwrap_err();
        assert!(err.to_string().contains("command_channel_capacity"));
    }
}
