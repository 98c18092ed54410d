//! `hookwright verify`: run the verify-on-idle plugin once.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use hookwright_core::{PluginInput, Project};
use hookwright_verify::VerifyPlugin;

use super::{load_config, resolve_worktree};
use crate::console_host::ConsoleHost;

/// Run verification as if `session` had just gone idle.
///
/// Exits with 1 when the checks fail.
pub(crate) async fn run(worktree: Option<&Path>, session: &str) -> Result<ExitCode> {
    let worktree = resolve_worktree(worktree)?;
    let config = load_config(&worktree)?.config;

    if !config.verify.enabled {
        eprintln!("Verification is disabled ([verify] enabled = false)");
        return Ok(ExitCode::SUCCESS);
    }

    let input = PluginInput::new(Arc::new(ConsoleHost::stdout()), Project::new(&worktree));
    let plugin = VerifyPlugin::new(input, config.verify);
    let outcome = plugin.verify(session).await;

    info!(
        run_id = %outcome.run_id,
        duration_ms = outcome.duration_ms,
        passed = outcome.is_success(),
        "Verification finished"
    );

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
