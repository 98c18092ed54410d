//! Configuration types.
//!
//! Every struct implements [`Default`] with the same values as the embedded
//! `defaults.toml`, so a bare `[section]` header produces a working setup.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration for Hookwright.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Verification plugin settings.
    pub verify: VerifySection,
    /// Tool/prompt optimizer settings.
    pub optimizer: OptimizerSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// VerifySection
// ---------------------------------------------------------------------------

/// How verification failure text reaches the conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureDelivery {
    /// Send a new message into the idle session right away.
    #[default]
    SendPrompt,
    /// Append to the user's pending input for their next turn.
    AppendPrompt,
}

impl fmt::Display for FailureDelivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SendPrompt => write!(f, "send_prompt"),
            Self::AppendPrompt => write!(f, "append_prompt"),
        }
    }
}

/// Settings for the verify-on-idle plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifySection {
    /// Whether the plugin is registered at all.
    pub enabled: bool,
    /// Verification command. Relative paths with a separator resolve
    /// against the project worktree; bare names go through `PATH`.
    pub command: String,
    /// Arguments passed to the command.
    pub args: Vec<String>,
    /// Extra environment variables for the command.
    pub env: HashMap<String, String>,
    /// Kill the command after this many seconds. `0` waits indefinitely.
    pub timeout_secs: u64,
    /// Show progress and result toasts.
    pub notify: bool,
    /// Where failure text goes.
    pub delivery: FailureDelivery,
    /// Duration of the info and success toasts.
    pub info_duration_ms: u64,
    /// Duration of the failure toast.
    pub error_duration_ms: u64,
}

impl Default for VerifySection {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "bin/verify".to_owned(),
            args: Vec::new(),
            env: HashMap::new(),
            timeout_secs: 0,
            notify: true,
            delivery: FailureDelivery::default(),
            info_duration_ms: 2000,
            error_duration_ms: 3000,
        }
    }
}

// ---------------------------------------------------------------------------
// OptimizerSection
// ---------------------------------------------------------------------------

/// How the optimizer rewrites tool descriptions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescriptionStrategy {
    /// Keep only the first line of every description and strip metadata.
    FirstLine,
    /// Substitute descriptions from the lookup file, keeping the rest.
    #[default]
    Overrides,
}

impl fmt::Display for DescriptionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstLine => write!(f, "first_line"),
            Self::Overrides => write!(f, "overrides"),
        }
    }
}

/// Settings for the tool/prompt optimizer plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerSection {
    /// Whether the plugin is registered at all.
    pub enabled: bool,
    /// Description rewriting strategy.
    pub strategy: DescriptionStrategy,
    /// JSON lookup file (`tools`, `parameters`, `systemPromptPrefix`).
    /// Relative paths resolve against the project worktree.
    pub config_path: PathBuf,
    /// Markdown appended to the system prompt prefix. Defaults to
    /// `<user config dir>/hookwright/system-prompt.md`.
    pub system_prompt_path: Option<PathBuf>,
}

impl Default for OptimizerSection {
    fn default() -> Self {
        Self {
            enabled: true,
            strategy: DescriptionStrategy::default(),
            config_path: PathBuf::from(".hookwright/tool-descriptions.json"),
            system_prompt_path: None,
        }
    }
}

impl OptimizerSection {
    /// The markdown path to use, falling back to the user config directory.
    #[must_use]
    pub fn resolved_system_prompt_path(&self) -> Option<PathBuf> {
        self.system_prompt_path
            .clone()
            .or_else(|| crate::loader::user_config_dir().map(|d| d.join("system-prompt.md")))
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"` or `"json"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["hookwright_verify=debug"]`).
    pub directives: Vec<String>,
    /// Write rotated log files here instead of stderr.
    pub directory: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
            directory: None,
        }
    }
}
