//! Hookwright Core - the host contract shared by every Hookwright plugin.
//!
//! A host runtime (the chat/tool-calling orchestration shell) loads plugins
//! and invokes them at named hook points. This crate defines:
//!
//! - The payloads the host exchanges with plugins ([`HostEvent`], [`ChatParams`])
//! - The notification surface the host exposes ([`HostClient`])
//! - The plugin trait and a small dispatcher ([`Plugin`], [`PluginSet`])
//!
//! # Example
//!
//! ```rust,ignore
//! use hookwright_core::prelude::*;
//!
//! let mut plugins = PluginSet::new();
//! plugins.register(Arc::new(my_plugin));
//!
//! plugins.dispatch_event(&HostEvent::session_idle("ses_1")).await;
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod chat;
pub mod error;
pub mod event;
pub mod host;
pub mod plugin;
pub mod text;

pub use chat::{ChatMessage, ChatOptions, ChatParams, FunctionSpec, ToolSpec};
pub use error::{HostError, HostResult, PluginError, PluginResult};
pub use event::{HookName, HostEvent, SessionRef};
pub use host::{HostClient, PluginInput, Project, PromptPart, Toast, ToastVariant};
pub use plugin::{Plugin, PluginId, PluginSet};
pub use text::first_line;
