//! Errors raised while running the verification command.
//!
//! These never leave the plugin as `Err`: the runner folds them into a
//! [`VerifyStatus`](crate::VerifyStatus) so they surface as conversation text.

use std::time::Duration;

use thiserror::Error;

/// Ways a verification run can fail to produce an exit status.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// The command could not be started or waited on.
    #[error("failed to execute verification command: {0}")]
    Spawn(#[from] std::io::Error),

    /// The command outlived its timeout and was killed.
    #[error("verification timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type for verification runs.
pub type VerifyResult<T> = Result<T, VerifyError>;
