//! Pure rewriting of chat params.

use serde::Serialize;
use serde_json::Value;

use hookwright_core::{ChatParams, ToolSpec, first_line};

use crate::descriptions::OptimizerConfig;

/// What to do to an outgoing request.
#[derive(Debug, Clone, Copy)]
pub enum Rewrite<'a> {
    /// Truncate every description to its first line and drop tool metadata.
    FirstLine,
    /// Substitute descriptions from a lookup table and replace the system
    /// prompt.
    Overrides {
        /// Lookup table.
        config: &'a OptimizerConfig,
        /// Replacement system prompt; empty leaves the system message alone.
        system_prompt: &'a str,
    },
}

/// Counts of what [`optimize`] changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OptimizeSummary {
    /// Tools whose description changed.
    pub tools_rewritten: usize,
    /// Parameter descriptions that changed.
    pub parameters_rewritten: usize,
    /// Whether the leading system message was replaced.
    pub system_prompt_replaced: bool,
}

/// Rewrite `params` in place.
pub fn optimize(params: &mut ChatParams, rewrite: Rewrite<'_>) -> OptimizeSummary {
    let mut summary = OptimizeSummary::default();

    if let Some(tools) = params.tools_mut() {
        for tool in tools.iter_mut() {
            let (tool_changed, params_changed) = match rewrite {
                Rewrite::FirstLine => shorten(tool),
                Rewrite::Overrides { config, .. } => substitute(tool, config),
            };
            if tool_changed {
                summary.tools_rewritten = summary.tools_rewritten.saturating_add(1);
            }
            summary.parameters_rewritten = summary.parameters_rewritten.saturating_add(params_changed);
        }
    }

    if let Rewrite::Overrides { system_prompt, .. } = rewrite
        && !system_prompt.is_empty()
        && let Some(first) = params.first_message_mut()
        && first.is_system()
    {
        first.set_text(system_prompt);
        summary.system_prompt_replaced = true;
    }

    summary
}

/// First-line truncation. Returns whether the tool description changed and
/// how many parameter descriptions did.
fn shorten(tool: &mut ToolSpec) -> (bool, usize) {
    *tool = tool.essentials();

    let mut tool_changed = false;
    if let Some(description) = tool.function.description.as_mut() {
        let line = first_line(description);
        // An empty first line would wipe the description, so keep it whole
        if !line.is_empty() && line.len() < description.len() {
            description.truncate(line.len());
            tool_changed = true;
        }
    }

    let mut params_changed = 0usize;
    for (_, schema) in tool.function.properties_mut().into_iter().flatten() {
        let Some(Value::String(description)) = schema.get_mut("description") else {
            continue;
        };
        let keep = first_line(description).len();
        if keep < description.len() {
            description.truncate(keep);
            params_changed = params_changed.saturating_add(1);
        }
    }

    (tool_changed, params_changed)
}

/// Lookup-table substitution. Everything without an entry is left as is.
fn substitute(tool: &mut ToolSpec, config: &OptimizerConfig) -> (bool, usize) {
    let name = tool.name().to_string();

    let mut tool_changed = false;
    if let Some(text) = config.tool_description(&name)
        && tool.function.description.as_deref() != Some(text)
    {
        tool.function.description = Some(text.to_string());
        tool_changed = true;
    }

    let mut params_changed = 0usize;
    for (param, schema) in tool.function.properties_mut().into_iter().flatten() {
        let Some(text) = config.parameter_description(&name, param) else {
            continue;
        };
        let Some(schema) = schema.as_object_mut() else {
            continue;
        };
        if schema.get("description").and_then(Value::as_str) != Some(text) {
            schema.insert("description".into(), Value::String(text.to_string()));
            params_changed = params_changed.saturating_add(1);
        }
    }

    (tool_changed, params_changed)
}
