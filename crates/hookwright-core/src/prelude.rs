//! Prelude module - commonly used types for convenient import.
//!
//! Use `use hookwright_core::prelude::*;` to import all essential types.

// Host payloads
pub use crate::{ChatMessage, ChatOptions, ChatParams, FunctionSpec, ToolSpec};
pub use crate::{HookName, HostEvent, SessionRef};

// Host surface
pub use crate::{HostClient, PluginInput, Project, PromptPart, Toast, ToastVariant};

// Plugins
pub use crate::{Plugin, PluginId, PluginSet};

// Errors
pub use crate::{HostError, HostResult, PluginError, PluginResult};
