//! Runs the verification command.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use chrono::Utc;
use tokio::process::Command;
use tracing::{debug, info, warn};
use uuid::Uuid;

use hookwright_config::VerifySection;

use crate::error::{VerifyError, VerifyResult};
use crate::outcome::{VerifyOutcome, VerifyStatus};

/// A fully resolved verification command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCommand {
    /// Program to run.
    pub program: PathBuf,
    /// Arguments.
    pub args: Vec<String>,
    /// Extra environment on top of the inherited one.
    pub env: HashMap<String, String>,
    /// Working directory (the project worktree).
    pub working_dir: PathBuf,
    /// `None` waits for the process however long it takes.
    pub timeout: Option<Duration>,
}

impl VerifyCommand {
    /// Build the command for `worktree` from config.
    ///
    /// Relative programs that contain a path separator are resolved against
    /// the worktree; bare names are left for `PATH` lookup.
    #[must_use]
    pub fn from_section(section: &VerifySection, worktree: &Path) -> Self {
        let program = PathBuf::from(&section.command);
        let program = if program.is_relative() && program.components().count() > 1 {
            worktree.join(program)
        } else {
            program
        };

        Self {
            program,
            args: section.args.clone(),
            env: section.env.clone(),
            working_dir: worktree.to_path_buf(),
            timeout: (section.timeout_secs > 0).then(|| Duration::from_secs(section.timeout_secs)),
        }
    }

    /// Add an environment variable.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }
}

/// Run the command and classify the result.
///
/// Never returns an error: spawn failures and timeouts become
/// [`VerifyStatus::SpawnFailed`] and [`VerifyStatus::TimedOut`].
pub async fn run_verification(command: &VerifyCommand) -> VerifyOutcome {
    let run_id = Uuid::new_v4();
    let started_at = Utc::now();

    debug!(
        run_id = %run_id,
        program = %command.program.display(),
        args = ?command.args,
        cwd = %command.working_dir.display(),
        "Running verification command"
    );

    let status = match execute(command).await {
        Ok(status) => status,
        Err(VerifyError::Timeout(limit)) => {
            let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
            warn!(run_id = %run_id, timeout_ms, "Verification command timed out");
            VerifyStatus::TimedOut { timeout_ms }
        },
        Err(e) => {
            warn!(run_id = %run_id, error = %e, "Verification command could not be run");
            VerifyStatus::SpawnFailed {
                error: e.to_string(),
            }
        },
    };

    let completed_at = Utc::now();
    #[allow(clippy::cast_sign_loss)]
    // chrono DateTime subtraction cannot overflow for wall-clock spans
    #[allow(clippy::arithmetic_side_effects)]
    let duration_ms = (completed_at - started_at).num_milliseconds().max(0) as u64;

    match &status {
        VerifyStatus::Passed { .. } => {
            info!(run_id = %run_id, duration_ms, "Verification passed");
        },
        VerifyStatus::Failed { exit_code, .. } => {
            info!(run_id = %run_id, duration_ms, exit_code = ?exit_code, "Verification failed");
        },
        VerifyStatus::TimedOut { .. } | VerifyStatus::SpawnFailed { .. } => {},
    }

    VerifyOutcome {
        run_id,
        started_at,
        completed_at,
        duration_ms,
        status,
    }
}

async fn execute(command: &VerifyCommand) -> VerifyResult<VerifyStatus> {
    let mut cmd = Command::new(&command.program);
    cmd.args(&command.args)
        .current_dir(&command.working_dir)
        .envs(&command.env)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        // Dropping the wait future on timeout must not leave the child running
        .kill_on_drop(true);

    let child = cmd.spawn()?;
    let output = match command.timeout {
        Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| VerifyError::Timeout(limit))??,
        None => child.wait_with_output().await?,
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if output.status.success() {
        return Ok(VerifyStatus::Passed { stdout });
    }

    Ok(VerifyStatus::Failed {
        exit_code: output.status.code(),
        stdout,
        stderr,
    })
}
