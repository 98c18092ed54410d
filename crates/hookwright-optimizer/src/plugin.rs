//! The `chat.params` plugin.

use std::path::PathBuf;
use std::sync::OnceLock;

use async_trait::async_trait;
use tracing::debug;

use hookwright_config::{DescriptionStrategy, OptimizerSection};
use hookwright_core::{ChatParams, HookName, Plugin, PluginId, PluginInput, PluginResult};

use crate::descriptions::{OptimizerConfig, derive_system_prompt};
use crate::rewrite::{OptimizeSummary, Rewrite, optimize};

const HOOKS: &[HookName] = &[HookName::ChatParams];

/// Rewrites tool descriptions and the system prompt of every outgoing
/// chat request.
///
/// The lookup file and the system prompt are each read the first time they
/// are needed and then reused for the life of the plugin. Edits to either
/// file take effect only after the host restarts.
#[derive(Debug)]
pub struct ToolOptimizerPlugin {
    id: PluginId,
    strategy: DescriptionStrategy,
    config_path: PathBuf,
    system_prompt_path: Option<PathBuf>,
    config: OnceLock<OptimizerConfig>,
    system_prompt: OnceLock<String>,
}

impl ToolOptimizerPlugin {
    /// Stable plugin ID.
    pub const ID: &'static str = "tool-optimizer";

    /// Create the plugin from host input and its config section.
    #[must_use]
    pub fn new(input: &PluginInput, section: &OptimizerSection) -> Self {
        Self {
            id: PluginId::from_static(Self::ID),
            strategy: section.strategy,
            config_path: input.project.resolve(&section.config_path),
            system_prompt_path: section
                .resolved_system_prompt_path()
                .map(|p| input.project.resolve(&p)),
            config: OnceLock::new(),
            system_prompt: OnceLock::new(),
        }
    }

    /// The description lookup table, loaded on first use.
    pub fn config(&self) -> &OptimizerConfig {
        self.config
            .get_or_init(|| OptimizerConfig::load_or_default(&self.config_path))
    }

    /// The replacement system prompt, derived on first use.
    pub fn system_prompt(&self) -> &str {
        self.system_prompt.get_or_init(|| {
            derive_system_prompt(
                &self.config().system_prompt_prefix,
                self.system_prompt_path.as_deref(),
            )
        })
    }

    /// Rewrite `params` in place with the configured strategy.
    pub fn apply(&self, params: &mut ChatParams) -> OptimizeSummary {
        let summary = optimize(params, self.rewrite());
        debug!(
            plugin_id = %self.id,
            strategy = %self.strategy,
            tools_rewritten = summary.tools_rewritten,
            parameters_rewritten = summary.parameters_rewritten,
            system_prompt_replaced = summary.system_prompt_replaced,
            "Optimized chat params"
        );
        summary
    }

    fn rewrite(&self) -> Rewrite<'_> {
        match self.strategy {
            DescriptionStrategy::FirstLine => Rewrite::FirstLine,
            DescriptionStrategy::Overrides => Rewrite::Overrides {
                config: self.config(),
                system_prompt: self.system_prompt(),
            },
        }
    }
}

#[async_trait]
impl Plugin for ToolOptimizerPlugin {
    fn id(&self) -> &PluginId {
        &self.id
    }

    fn hooks(&self) -> &[HookName] {
        HOOKS
    }

    async fn on_chat_params(&self, params: &mut ChatParams) -> PluginResult<()> {
        self.apply(params);
        Ok(())
    }
}
