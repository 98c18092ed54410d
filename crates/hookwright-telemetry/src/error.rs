//! Telemetry error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while installing the log subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The level or a directive is not a valid filter.
    #[error("invalid log filter `{filter}`: {message}")]
    InvalidFilter {
        /// The offending level or directive.
        filter: String,
        /// Parser message.
        message: String,
    },

    /// The log file directory could not be created.
    #[error("cannot create log directory {path}: {source}")]
    LogDirectory {
        /// Directory that was requested.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A global subscriber is already set.
    #[error("logging already initialised: {0}")]
    AlreadyInstalled(String),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
