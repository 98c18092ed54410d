//! Errors reading the lookup file and system prompt.

use std::path::PathBuf;

use thiserror::Error;

/// Errors loading optimizer inputs.
///
/// The plugin never returns these to the host; it logs them and carries on
/// with an empty lookup table.
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The description file is not valid JSON of the expected shape.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl OptimizerError {
    /// Whether the file simply does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result type for optimizer loading.
pub type OptimizerResult<T> = Result<T, OptimizerError>;
