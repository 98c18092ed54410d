//! Error types for host calls and plugin dispatch.

use thiserror::Error;

/// Errors returned by the host's notification surface.
#[derive(Debug, Error)]
pub enum HostError {
    /// The host rejected the call.
    #[error("host rejected {call}: {message}")]
    Rejected {
        /// Name of the host call (e.g. `toast`).
        call: &'static str,
        /// Reason given by the host.
        message: String,
    },

    /// The host is not reachable (closed channel, dead process).
    #[error("host unavailable: {0}")]
    Unavailable(String),

    /// IO error while talking to the host.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for host calls.
pub type HostResult<T> = Result<T, HostError>;

/// Errors from plugin operations.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The plugin ID is invalid.
    #[error("invalid plugin id: {0}")]
    InvalidId(String),

    /// A plugin with this ID is already registered.
    #[error("plugin already registered: {0}")]
    AlreadyRegistered(String),

    /// A hook handler failed. Plugins report their own failures with this;
    /// [`PluginSet`](crate::PluginSet) logs it and moves on.
    #[error("hook {hook} failed in plugin {plugin_id}: {message}")]
    HookFailed {
        /// The plugin whose handler failed.
        plugin_id: String,
        /// The hook being dispatched.
        hook: String,
        /// Failure reason.
        message: String,
    },
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;
