//! Verification results.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Text used when a failed run left no usable output.
pub const FALLBACK_FAILURE_TEXT: &str = "Verification failed";

/// How a verification run ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum VerifyStatus {
    /// Exit code 0.
    Passed {
        /// Captured stdout.
        stdout: String,
    },
    /// Non-zero exit (or killed by a signal, in which case `exit_code` is `None`).
    Failed {
        /// Process exit code, if it exited normally.
        exit_code: Option<i32>,
        /// Captured stdout.
        stdout: String,
        /// Captured stderr.
        stderr: String,
    },
    /// Killed after exceeding the configured timeout.
    TimedOut {
        /// The timeout that was exceeded, in milliseconds.
        timeout_ms: u64,
    },
    /// The command never ran.
    SpawnFailed {
        /// Why it could not be started.
        error: String,
    },
}

impl VerifyStatus {
    /// Whether the checks passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Passed { .. })
    }
}

/// One verification run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOutcome {
    /// Correlates log lines for this run.
    pub run_id: Uuid,
    /// When the command was started.
    pub started_at: DateTime<Utc>,
    /// When the command finished (or was abandoned).
    pub completed_at: DateTime<Utc>,
    /// Wall time in milliseconds.
    pub duration_ms: u64,
    /// How the run ended.
    pub status: VerifyStatus,
}

impl VerifyOutcome {
    /// Whether the checks passed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Text describing the failure, or `None` if the run passed.
    ///
    /// Prefers stderr, then stdout; empty streams fall through to
    /// [`FALLBACK_FAILURE_TEXT`].
    #[must_use]
    pub fn failure_output(&self) -> Option<String> {
        match &self.status {
            VerifyStatus::Passed { .. } => None,
            VerifyStatus::Failed { stdout, stderr, .. } => Some(
                [stderr, stdout]
                    .into_iter()
                    .find(|s| !s.is_empty())
                    .cloned()
                    .unwrap_or_else(|| FALLBACK_FAILURE_TEXT.to_string()),
            ),
            VerifyStatus::TimedOut { timeout_ms } => Some(format!(
                "verification timed out after {:?}",
                Duration::from_millis(*timeout_ms)
            )),
            VerifyStatus::SpawnFailed { .. } => Some(FALLBACK_FAILURE_TEXT.to_string()),
        }
    }
}

/// The instruction fed back into the conversation after a failed run.
#[must_use]
pub fn failure_prompt(output: &str) -> String {
    format!("🔴 Verification failed:\n{output}\n\nPlease fix the failing tests.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(status: VerifyStatus) -> VerifyOutcome {
        let now = Utc::now();
        VerifyOutcome {
            run_id: Uuid::new_v4(),
            started_at: now,
            completed_at: now,
            duration_ms: 0,
            status,
        }
    }

    #[test]
    fn test_passed_has_no_failure_output() {
        let o = outcome(VerifyStatus::Passed {
            stdout: "ok".into(),
        });
        assert!(o.is_success());
        assert!(o.failure_output().is_none());
    }

    #[test]
    fn test_failure_output_prefers_stderr() {
        let o = outcome(VerifyStatus::Failed {
            exit_code: Some(1),
            stdout: "3 passed".into(),
            stderr: "test_login FAILED".into(),
        });
        assert_eq!(o.failure_output().as_deref(), Some("test_login FAILED"));
    }

    #[test]
    fn test_failure_output_falls_back_to_stdout_then_generic() {
        let o = outcome(VerifyStatus::Failed {
            exit_code: Some(2),
            stdout: "lint: 4 errors".into(),
            stderr: String::new(),
        });
        assert_eq!(o.failure_output().as_deref(), Some("lint: 4 errors"));

        let o = outcome(VerifyStatus::Failed {
            exit_code: None,
            stdout: String::new(),
            stderr: String::new(),
        });
        assert_eq!(o.failure_output().as_deref(), Some(FALLBACK_FAILURE_TEXT));

        let o = outcome(VerifyStatus::SpawnFailed {
            error: "No such file or directory".into(),
        });
        assert_eq!(o.failure_output().as_deref(), Some(FALLBACK_FAILURE_TEXT));
    }

    #[test]
    fn test_status_serializes_with_tag() {
        let json = serde_json::to_value(VerifyStatus::TimedOut { timeout_ms: 5000 }).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "timed_out", "timeout_ms": 5000})
        );

        let o = outcome(VerifyStatus::TimedOut { timeout_ms: 5000 });
        assert_eq!(
            o.failure_output().as_deref(),
            Some("verification timed out after 5s")
        );

        let o = outcome(VerifyStatus::TimedOut { timeout_ms: 250 });
        assert_eq!(
            o.failure_output().as_deref(),
            Some("verification timed out after 250ms")
        );
    }

    #[test]
    fn test_failure_prompt_format() {
        assert_eq!(
            failure_prompt("boom"),
            "🔴 Verification failed:\nboom\n\nPlease fix the failing tests."
        );
    }
}
