//! Message and Conversation domain types.
//!
//! These are the core value objects that flow through the system:
//! the operator sends a message → the agent loop processes it → the provider
//! generates a response, possibly requesting tools along the way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions (the operator-assistant prompt)
    System,
    /// The human operator
    User,
    /// The language model
    Assistant,
    /// Tool execution result
    Tool,
}

/// A single message in a conversation.
///
/// Invariant: a tool-role message always answers exactly one preceding
/// assistant tool call, linked through `tool_call_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique message ID
    pub id: String,

    /// Who sent this message
    pub role: Role,

    /// The text content (may be empty for a pure tool-request turn)
    pub content: String,

    /// Tool calls requested by the assistant (if any); empty means this
    /// assistant turn is a final answer
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<MessageToolCall>,

    /// If this is a tool result, which tool call it responds to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// If this is a tool result, the name of the tool that produced it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,

    /// Timestamp
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::with_role(Role::System, content)
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_role(Role::User, content)
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_role(Role::Assistant, content)
    }

    /// Create a tool result message linked to the invocation it answers.
    pub fn tool_result(
        tool_call_id: impl Into<String>,
        tool_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let mut msg = Self::with_role(Role::Tool, content);
        msg.tool_call_id = Some(tool_call_id.into());
        msg.tool_name = Some(tool_name.into());
        msg
    }

    fn with_role(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            tool_name: None,
            timestamp: Utc::now(),
        }
    }

    /// Whether this assistant message requests any tools.
    pub fn requests_tools(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// A tool call embedded in an assistant message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageToolCall {
    /// Unique ID for this tool call
    pub id: String,

    /// Name of the tool to invoke
    pub name: String,

    /// Arguments as a JSON string, exactly as the model produced them
    pub arguments: String,
}

/// A conversation transcript — an ordered sequence of messages.
///
/// Messages are strictly append-only; the transcript is never reordered or
/// deduplicated. `system_attached` records whether the system prompt has
/// been prepended, so the agent loop never has to scan the message list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    /// Unique conversation ID
    pub id: ConversationId,

    /// Ordered messages
    pub messages: Vec<Message>,

    /// Set once when the system prompt is prepended
    #[serde(default)]
    pub system_attached: bool,

    /// When this conversation was created
    pub created_at: DateTime<Utc>,

    /// When the last message was added
    pub updated_at: DateTime<Utc>,

    /// Optional title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Conversation {
    /// Create a new empty conversation.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: ConversationId::new(),
            messages: Vec::new(),
            system_attached: false,
            created_at: now,
            updated_at: now,
            title: None,
        }
    }

    /// Append a message to the transcript.
    pub fn push(&mut self, message: Message) {
        self.updated_at = Utc::now();
        self.messages.push(message);
    }

    /// Prepend the system prompt. No-op after the first call.
    pub fn attach_system_prompt(&mut self, prompt: &str) {
        if self.system_attached {
            return;
        }
        self.messages.insert(0, Message::system(prompt));
        self.system_attached = true;
        self.updated_at = Utc::now();
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_user_message() {
        let msg = Message::user("Check device 192.168.1.100");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "Check device 192.168.1.100");
        assert!(msg.tool_calls.is_empty());
        assert!(!msg.requests_tools());
    }

    #[test]
    fn tool_result_carries_linkage() {
        let msg = Message::tool_result("call_1", "check_device_connection", "{}");
        assert_eq!(msg.role, Role::Tool);
        assert_eq!(msg.tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(msg.tool_name.as_deref(), Some("check_device_connection"));
    }

    #[test]
    fn system_prompt_attaches_exactly_once() {
        let mut conv = Conversation::new();
        conv.push(Message::user("hello"));

        conv.attach_system_prompt("You are a test assistant.");
        assert!(conv.system_attached);
        assert_eq!(conv.messages.len(), 2);
        assert_eq!(conv.messages[0].role, Role::System);

        // Second attach is a no-op
        conv.attach_system_prompt("Different prompt");
        assert_eq!(conv.messages.len(), 2);
        assert_eq!(conv.messages[0].content, "You are a test assistant.");
    }

    #[test]
    fn conversation_tracks_updates() {
        let mut conv = Conversation::new();
        let created = conv.created_at;

        conv.push(Message::user("First message"));
        assert_eq!(conv.messages.len(), 1);
        assert!(conv.updated_at >= created);
    }

    #[test]
    fn message_serialization_roundtrip() {
        let msg = Message::tool_result("call_9", "execute_auth_test", r#"{"success":true}"#);
        let json = serde_json::to_string(&msg).unwrap();
        let deserialized: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.role, Role::Tool);
        assert_eq!(deserialized.tool_name.as_deref(), Some("execute_auth_test"));
    }
}
