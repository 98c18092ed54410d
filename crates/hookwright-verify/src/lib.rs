//! Hookwright Verify - run a project's checks whenever the agent goes idle.
//!
//! When the host reports `session.idle`, [`VerifyPlugin`] runs the configured
//! command in the project worktree. A non-zero exit is turned into a prompt
//! asking the agent to fix the failing tests, delivered either straight into
//! the session or into the user's pending input.
//!
//! [`run_verification`] is usable on its own when no host is present.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod outcome;
pub mod plugin;
pub mod runner;

pub use error::{VerifyError, VerifyResult};
pub use outcome::{FALLBACK_FAILURE_TEXT, VerifyOutcome, VerifyStatus, failure_prompt};
pub use plugin::{SESSION_ENV, VerifyPlugin, WORKTREE_ENV};
pub use runner::{VerifyCommand, run_verification};
