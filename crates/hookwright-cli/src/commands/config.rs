//! `hookwright config`: inspect the effective configuration.

use std::path::Path;

use anyhow::Result;

use super::{load_config, resolve_worktree};

/// Print the merged configuration as TOML, preceded by the files it came
/// from.
pub(crate) fn show(worktree: Option<&Path>) -> Result<()> {
    let worktree = resolve_worktree(worktree)?;
    let resolved = load_config(&worktree)?;

    println!("# defaults: embedded");
    for file in &resolved.loaded_files {
        println!("# loaded: {file}");
    }
    println!();
    print!("{}", resolved.config.to_toml_string()?);
    Ok(())
}
