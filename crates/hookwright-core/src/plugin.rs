//! Plugin trait and dispatch.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::chat::ChatParams;
use crate::error::{PluginError, PluginResult};
use crate::event::{HookName, HostEvent};

/// Unique, stable, human-readable plugin identifier.
///
/// Plugin IDs are strings like `"auto-verify"` or `"tool-optimizer"`. They
/// must be non-empty and contain only lowercase alphanumeric characters and
/// hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PluginId(String);

impl<'de> Deserialize<'de> for PluginId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

impl PluginId {
    /// Create a new `PluginId`, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID is empty or contains invalid characters.
    pub fn new(id: impl Into<String>) -> PluginResult<Self> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Create a `PluginId` without validation, for IDs fixed at compile time.
    #[must_use]
    pub fn from_static(id: &'static str) -> Self {
        Self(id.to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn validate(id: &str) -> PluginResult<()> {
        if id.is_empty() {
            return Err(PluginError::InvalidId("plugin id must not be empty".into()));
        }
        if !id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(PluginError::InvalidId(format!(
                "plugin id must contain only lowercase alphanumeric characters and hyphens, got: {id}"
            )));
        }
        if id.starts_with('-') || id.ends_with('-') {
            return Err(PluginError::InvalidId(format!(
                "plugin id must not start or end with a hyphen, got: {id}"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PluginId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A plugin the host invokes at named hook points.
///
/// The host awaits each handler to completion before delivering the next
/// event, so implementations need no internal scheduling. Handlers for hooks
/// not listed in [`Plugin::hooks`] are never called.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// The unique identifier for this plugin.
    fn id(&self) -> &PluginId;

    /// Hooks this plugin subscribes to.
    fn hooks(&self) -> &[HookName];

    /// Handle an event from the `event` hook.
    async fn on_event(&self, _event: &HostEvent) -> PluginResult<()> {
        Ok(())
    }

    /// Rewrite outgoing chat parameters in place (`chat.params` hook).
    async fn on_chat_params(&self, _params: &mut ChatParams) -> PluginResult<()> {
        Ok(())
    }
}

impl fmt::Debug for dyn Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("id", self.id())
            .field("hooks", &self.hooks())
            .finish_non_exhaustive()
    }
}

/// An ordered set of plugins with per-hook dispatch.
///
/// Dispatch is sequential in registration order. A failing plugin is logged
/// and skipped; the remaining plugins still run.
#[derive(Default)]
pub struct PluginSet {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::AlreadyRegistered`] if a plugin with the same
    /// ID is already present.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> PluginResult<()> {
        if self.plugins.iter().any(|p| p.id() == plugin.id()) {
            return Err(PluginError::AlreadyRegistered(plugin.id().to_string()));
        }
        debug!(plugin_id = %plugin.id(), hooks = ?plugin.hooks(), "Registered plugin");
        self.plugins.push(plugin);
        Ok(())
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether no plugins are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Plugins subscribed to `hook`, in registration order.
    pub fn subscribers(&self, hook: HookName) -> impl Iterator<Item = &Arc<dyn Plugin>> {
        self.plugins.iter().filter(move |p| p.hooks().contains(&hook))
    }

    /// Deliver an event to every `event` subscriber.
    ///
    /// Returns the errors of plugins that failed; they have already been
    /// logged.
    pub async fn dispatch_event(&self, event: &HostEvent) -> Vec<PluginError> {
        let mut failures = Vec::new();
        for plugin in self.subscribers(HookName::Event) {
            if let Err(e) = plugin.on_event(event).await {
                warn!(
                    plugin_id = %plugin.id(),
                    event = event.kind(),
                    error = %e,
                    "Plugin event handler failed, continuing"
                );
                failures.push(e);
            }
        }
        failures
    }

    /// Let every `chat.params` subscriber rewrite `params`.
    ///
    /// Returns the errors of plugins that failed; they have already been
    /// logged.
    pub async fn dispatch_chat_params(&self, params: &mut ChatParams) -> Vec<PluginError> {
        let mut failures = Vec::new();
        for plugin in self.subscribers(HookName::ChatParams) {
            if let Err(e) = plugin.on_chat_params(params).await {
                warn!(
                    plugin_id = %plugin.id(),
                    error = %e,
                    "Plugin chat.params handler failed, continuing"
                );
                failures.push(e);
            }
        }
        failures
    }
}

impl fmt::Debug for PluginSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.plugins.iter()).finish()
    }
}
