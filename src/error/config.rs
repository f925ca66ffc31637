//! Configuration errors.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while loading or validating agent configuration.
///
/// These are the only startup-fatal errors. They are raised before any
/// loop starts, never by the running reconciler.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },

    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),

    #[error("{interval} must be at most {max:?}")]
    IntervalTooLong {
        interval: &'static str,
        max: Duration,
    },

    #[error("request timeout {timeout:?} must be shorter than the {interval} interval")]
    TimeoutTooLong {
        timeout: Duration,
        interval: &'static str,
    },

    #[error("failed to load root CA '{}': {message}", path.display())]
    RootCa { path: PathBuf, message: String },

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}
