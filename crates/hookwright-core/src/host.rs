//! The host's notification surface and plugin construction input.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::HostResult;

/// Severity of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    /// Informational.
    Info,
    /// Something succeeded.
    Success,
    /// Something needs attention.
    Warning,
    /// Something failed.
    Error,
}

impl fmt::Display for ToastVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A transient notification shown by the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    pub variant: ToastVariant,
    /// Display duration in milliseconds.
    pub duration: u64,
}

impl Toast {
    /// Create a toast.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        variant: ToastVariant,
        duration: u64,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            variant,
            duration,
        }
    }
}

/// One part of a prompt sent into a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PromptPart {
    /// Plain text.
    Text {
        /// The text.
        text: String,
    },
}

impl PromptPart {
    /// Create a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }
}

/// Calls a plugin can make back into the host.
///
/// All calls are fire-and-forget from the plugin's point of view: there is no
/// acknowledgement beyond the returned result, and callers log failures
/// rather than retrying.
#[async_trait]
pub trait HostClient: Send + Sync {
    /// Show a toast notification.
    async fn toast(&self, toast: Toast) -> HostResult<()>;

    /// Append text to the user's pending input for their next turn.
    async fn append_prompt(&self, text: &str) -> HostResult<()>;

    /// Send a message into a session immediately.
    async fn send_prompt(&self, session_id: &str, parts: Vec<PromptPart>) -> HostResult<()>;
}

/// The project the host has open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Root of the project's working tree.
    pub worktree: PathBuf,
}

impl Project {
    /// Create a project rooted at `worktree`.
    #[must_use]
    pub fn new(worktree: impl Into<PathBuf>) -> Self {
        Self {
            worktree: worktree.into(),
        }
    }

    /// Resolve `path` against the worktree unless it is already absolute.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.worktree.join(path)
        }
    }
}

/// What the host hands a plugin factory.
#[derive(Clone)]
pub struct PluginInput {
    /// Host notification surface.
    pub client: Arc<dyn HostClient>,
    /// The open project.
    pub project: Project,
}

impl PluginInput {
    /// Create plugin input.
    #[must_use]
    pub fn new(client: Arc<dyn HostClient>, project: Project) -> Self {
        Self { client, project }
    }
}

impl fmt::Debug for PluginInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginInput")
            .field("project", &self.project)
            .finish_non_exhaustive()
    }
}
