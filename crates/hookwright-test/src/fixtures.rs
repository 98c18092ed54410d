//! Test fixtures for common types.

use std::path::{Path, PathBuf};

use serde_json::json;

use hookwright_core::{ChatMessage, ChatParams, ToolSpec};

/// A `bash` tool with a multi-line description and one documented parameter.
#[must_use]
pub fn test_bash_tool() -> ToolSpec {
    ToolSpec::function("bash")
        .with_description("Executes a bash command.\n\nUse this for git, builds and tests.")
        .with_parameters(json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "string",
                    "description": "The command to execute.\nQuote paths with spaces."
                },
                "timeout": {
                    "type": "number"
                }
            },
            "required": ["command"]
        }))
}

/// A `Read` tool (capitalised, as some hosts name it) with one parameter.
#[must_use]
pub fn test_read_tool() -> ToolSpec {
    ToolSpec::function("Read")
        .with_description("Reads a file from the local filesystem.\nSupports line offsets.")
        .with_parameters(json!({
            "type": "object",
            "properties": {
                "filePath": {
                    "type": "string",
                    "description": "Absolute path to the file.\nRelative paths are rejected."
                }
            }
        }))
}

/// Chat params carrying [`test_bash_tool`], [`test_read_tool`], a system
/// message and a user message.
#[must_use]
pub fn test_chat_params() -> ChatParams {
    ChatParams::with_tools(vec![test_bash_tool(), test_read_tool()])
        .with_message(ChatMessage::system("You are the host's default prompt."))
        .with_message(ChatMessage::user("fix the build"))
}

/// Write an executable shell script named `name` into `dir`.
///
/// # Panics
///
/// Panics if the file cannot be written or made executable.
#[must_use]
#[allow(clippy::expect_used)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod script");
    }
    path
}

/// A fresh temporary directory to act as a project worktree.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
#[allow(clippy::expect_used)]
pub fn test_worktree() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp worktree")
}
