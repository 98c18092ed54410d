//! `hookwright optimize`: rewrite a chat-params document.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use hookwright_core::{ChatParams, PluginInput, Project};
use hookwright_optimizer::ToolOptimizerPlugin;

use super::{load_config, resolve_worktree};
use crate::console_host::ConsoleHost;

/// Read chat params from `input` (or stdin), optimize them and print the
/// result as pretty JSON.
pub(crate) fn run(input: Option<&Path>, worktree: Option<&Path>) -> Result<()> {
    let worktree = resolve_worktree(worktree)?;
    let config = load_config(&worktree)?.config;

    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        },
    };
    let mut params: ChatParams =
        serde_json::from_str(&raw).context("input is not a valid chat params document")?;

    if config.optimizer.enabled {
        let plugin_input = PluginInput::new(Arc::new(ConsoleHost::stdout()), Project::new(&worktree));
        let summary = ToolOptimizerPlugin::new(&plugin_input, &config.optimizer).apply(&mut params);
        eprintln!(
            "{} tool(s), {} parameter(s) rewritten; system prompt {}",
            summary.tools_rewritten,
            summary.parameters_rewritten,
            if summary.system_prompt_replaced {
                "replaced"
            } else {
                "unchanged"
            }
        );
    } else {
        eprintln!("Optimizer is disabled ([optimizer] enabled = false); passing through");
    }

    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}
