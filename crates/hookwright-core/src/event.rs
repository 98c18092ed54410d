//! Hook names and host events.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hook points a plugin can subscribe to.
///
/// The string forms match the keys of the host's plugin contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookName {
    /// Generic event stream (`"event"`).
    #[serde(rename = "event")]
    Event,
    /// Fired before each chat-completion request (`"chat.params"`).
    #[serde(rename = "chat.params")]
    ChatParams,
}

impl HookName {
    /// The host-facing key for this hook.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::ChatParams => "chat.params",
        }
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a host session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRef {
    /// Host session identifier.
    pub id: String,
}

/// An event delivered on the `event` hook.
///
/// Only the kinds Hookwright reacts to are modelled; anything else the host
/// emits deserializes to [`HostEvent::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostEvent {
    /// The agent has no further immediate action pending.
    #[serde(rename = "session.idle")]
    SessionIdle {
        /// The session that went idle.
        session: SessionRef,
    },
    /// Any event type not listed above.
    #[serde(other)]
    Other,
}

impl HostEvent {
    /// Build a `session.idle` event.
    #[must_use]
    pub fn session_idle(session_id: impl Into<String>) -> Self {
        Self::SessionIdle {
            session: SessionRef {
                id: session_id.into(),
            },
        }
    }

    /// The host's type tag for this event.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SessionIdle { .. } => "session.idle",
            Self::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_name_display() {
        assert_eq!(HookName::Event.to_string(), "event");
        assert_eq!(HookName::ChatParams.to_string(), "chat.params");
    }

    #[test]
    fn test_session_idle_from_host_json() {
        let event: HostEvent =
            serde_json::from_str(r#"{"type":"session.idle","session":{"id":"ses_42"}}"#).unwrap();
        assert_eq!(event, HostEvent::session_idle("ses_42"));
        assert_eq!(event.kind(), "session.idle");
    }

    #[test]
    fn test_unknown_event_is_other() {
        let event: HostEvent =
            serde_json::from_str(r#"{"type":"message.updated","properties":{"x":1}}"#).unwrap();
        assert_eq!(event, HostEvent::Other);
        assert_eq!(event.kind(), "other");
    }
}
