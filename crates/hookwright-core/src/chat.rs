//! The request-shaping object handed to `chat.params` handlers.
//!
//! These types mirror the host's JSON. Every struct keeps unknown fields in a
//! flattened `extra` map so a handler that only touches descriptions hands the
//! rest of the request back to the host untouched.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Outgoing chat-completion parameters.
///
/// Absent and present-but-empty fields are kept apart so the host gets back
/// exactly the shape it sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatParams {
    /// Provider options, including the tool list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ChatOptions>,
    /// Conversation messages, system prompt first when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<ChatMessage>>,
    /// Fields Hookwright does not interpret.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatParams {
    /// Create params with the given tools and no messages.
    #[must_use]
    pub fn with_tools(tools: Vec<ToolSpec>) -> Self {
        Self {
            options: Some(ChatOptions {
                tools: Some(Some(tools)),
                extra: Map::new(),
            }),
            ..Self::default()
        }
    }

    /// Append a message.
    #[must_use]
    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.get_or_insert_with(Vec::new).push(message);
        self
    }

    /// The tool list, if the host sent one.
    #[must_use]
    pub fn tools(&self) -> Option<&[ToolSpec]> {
        self.options.as_ref()?.tools.as_ref()?.as_deref()
    }

    /// Mutable tool list, if the host sent one.
    pub fn tools_mut(&mut self) -> Option<&mut Vec<ToolSpec>> {
        self.options.as_mut()?.tools.as_mut()?.as_mut()
    }

    /// The conversation, empty when the host sent none.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        self.messages.as_deref().unwrap_or_default()
    }

    /// The leading message, if any.
    pub fn first_message_mut(&mut self) -> Option<&mut ChatMessage> {
        self.messages.as_mut()?.first_mut()
    }
}

/// Provider options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatOptions {
    /// Tools exposed to the model. The outer `Option` is whether the key was
    /// sent at all, the inner one whether it was `null`.
    #[allow(clippy::option_option)]
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub tools: Option<Option<Vec<ToolSpec>>>,
    /// Other provider options (temperature, etc.).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Marks a key that appeared in the input, even with a `null` value.
#[allow(clippy::option_option)]
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A tool descriptor as the host sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Tool type, as sent; `"function"` for every tool the host currently emits.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// The callable's definition.
    pub function: FunctionSpec,
    /// Host metadata outside the essential fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolSpec {
    /// Create a function tool.
    #[must_use]
    pub fn function(name: impl Into<String>) -> Self {
        Self {
            kind: Some("function".to_string()),
            function: FunctionSpec {
                name: name.into(),
                description: None,
                parameters: None,
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.function.description = Some(description.into());
        self
    }

    /// Set the parameter schema.
    #[must_use]
    pub fn with_parameters(mut self, parameters: Value) -> Self {
        self.function.parameters = Some(parameters);
        self
    }

    /// The tool's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.function.name
    }

    /// A copy carrying only `type`, `function.name`, `function.description`
    /// and `function.parameters`.
    #[must_use]
    pub fn essentials(&self) -> Self {
        Self {
            kind: self.kind.clone(),
            function: FunctionSpec {
                name: self.function.name.clone(),
                description: self.function.description.clone(),
                parameters: self.function.parameters.clone(),
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }
}

/// Function definition inside a [`ToolSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Function name.
    pub name: String,
    /// Human-readable description shown to the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON schema for the arguments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    /// Other function fields (e.g. `strict`).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FunctionSpec {
    /// Mutable access to `parameters.properties`, when it is an object.
    pub fn properties_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.parameters
            .as_mut()?
            .get_mut("properties")?
            .as_object_mut()
    }

    /// Description of a single parameter, when present and a string.
    #[must_use]
    pub fn parameter_description(&self, param: &str) -> Option<&str> {
        self.parameters
            .as_ref()?
            .get("properties")?
            .get(param)?
            .get("description")?
            .as_str()
    }
}

/// A conversation message.
///
/// `role` is kept as the host's raw string so roles Hookwright has never
/// heard of survive a round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role (`system`, `user`, `assistant`, ...).
    pub role: String,
    /// Message content; a string or a list of parts depending on the host.
    #[serde(default)]
    pub content: Value,
    /// Other message fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChatMessage {
    /// Create a message with text content.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: Value::String(content.into()),
            extra: Map::new(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Whether this is a system message.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.role == "system"
    }

    /// Text content, if the content is a plain string.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content.as_str()
    }

    /// Replace the content wholesale with text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Value::String(text.into());
    }
}
