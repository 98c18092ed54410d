//! Environment variable overrides.
//!
//! Unlike file layers these win over everything, so a host can point a
//! single session at a different verify script without editing files.

use std::collections::HashMap;

use crate::merge::set_path;

/// Environment variable → dotted config path.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("HOOKWRIGHT_VERIFY_COMMAND", "verify.command"),
    ("HOOKWRIGHT_OPTIMIZER_CONFIG", "optimizer.config_path"),
    ("HOOKWRIGHT_SYSTEM_PROMPT", "optimizer.system_prompt_path"),
    ("HOOKWRIGHT_LOG", "logging.level"),
];

/// Snapshot the `HOOKWRIGHT_*` variables from the process environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(key, _)| key.starts_with("HOOKWRIGHT_"))
        .collect()
}

/// Apply known overrides to the merged tree. Empty values are ignored.
///
/// Returns how many overrides were applied.
pub fn apply_env_overrides(merged: &mut toml::Value, env_vars: &HashMap<String, String>) -> usize {
    let mut applied = 0_usize;
    for (var, path) in ENV_OVERRIDES {
        if let Some(value) = env_vars.get(*var).filter(|v| !v.trim().is_empty()) {
            set_path(merged, path, toml::Value::String(value.clone()));
            applied = applied.saturating_add(1);
        }
    }
    applied
}
