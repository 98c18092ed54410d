//! CLI command implementations.

pub(crate) mod config;
pub(crate) mod optimize;
pub(crate) mod verify;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use hookwright_config::{Config, ResolvedConfig};

/// The worktree to operate on: `--worktree` or the current directory.
pub(crate) fn resolve_worktree(worktree: Option<&Path>) -> Result<PathBuf> {
    let dir = match worktree {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().context("failed to determine current directory")?,
    };
    dir.canonicalize()
        .with_context(|| format!("worktree {} does not exist", dir.display()))
}

/// Load the layered configuration for `worktree`.
pub(crate) fn load_config(worktree: &Path) -> Result<ResolvedConfig> {
    Config::load(Some(worktree)).context("failed to load configuration")
}
