//! Logging configuration using tracing
//!
//! Structured logging to stderr with support for the RUST_LOG environment variable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when RUST_LOG is unset
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize the tracing subscriber with the default filter
///
/// # Example RUST_LOG values
/// - `RUST_LOG=info` - Show rescans and above
/// - `RUST_LOG=folderwatch=debug` - Every folder state transition
/// - `RUST_LOG=folderwatch=debug,fsprobe=warn` - Different levels per crate
///
/// # Errors
/// Returns an error if the subscriber has already been initialized
pub fn init() -> crate::Result<()> {
    init_with_filter(DEFAULT_FILTER)
}

/// Initialize the tracing subscriber, falling back to `default_filter`
/// when RUST_LOG is unset or invalid
pub fn init_with_filter(default_filter: &str) -> crate::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_line_number(true),
        )
        .try_init()
        .map_err(|e| crate::WatcherError::Other(format!("Failed to initialize tracing: {}", e)))?;

    Ok(())
}

/// Initialize logging for tests (no-op if already initialized)
pub fn init_test() {
    let _ = init();
}
