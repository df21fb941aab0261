//! Streaming events emitted during a run.
//!
//! `AgentEvent` is the wire contract between the orchestration loop and
//! whatever front-end is listening — a terminal, an SSE stream, a test
//! collector. The shapes are stable:
//!
//! - `tool_call`          — the model decided to invoke a tool
//! - `assistant_message`  — the model's final text answer
//! - `error`              — the run failed (provider error or round bound)
//! - `complete`           — the run finished successfully
//!
//! Events describe what happened and nothing else; persistence and rendering
//! are the subscriber's business.

use serde::{Deserialize, Serialize};

/// Events emitted by the agent loop, in emission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentEvent {
    /// The model is invoking a tool with the given arguments.
    ToolCall {
        tool_name: String,
        parameters: serde_json::Value,
    },

    /// The model's final text answer for this run.
    AssistantMessage { content: String, is_complete: bool },

    /// The run failed. Terminal: no `complete` follows.
    Error { message: String },

    /// The run finished successfully. Always the last event of a
    /// successful run.
    Complete,
}

impl AgentEvent {
    /// Stable event name, matching the serialized `type` tag.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ToolCall { .. } => "tool_call",
            Self::AssistantMessage { .. } => "assistant_message",
            Self::Error { .. } => "error",
            Self::Complete => "complete",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_call_serialization() {
        let event = AgentEvent::ToolCall {
            tool_name: "check_device_connection".into(),
            parameters: serde_json::json!({"device_ip": "192.168.1.100"}),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"tool_call""#));
        assert!(json.contains(r#""tool_name":"check_device_connection""#));
        assert!(json.contains(r#""device_ip":"192.168.1.100""#));
    }

    #[test]
    fn assistant_message_serialization() {
        let event = AgentEvent::AssistantMessage {
            content: "The device is reachable.".into(),
            is_complete: true,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"assistant_message""#));
        assert!(json.contains(r#""is_complete":true"#));
    }

    #[test]
    fn complete_serializes_to_bare_tag() {
        let json = serde_json::to_string(&AgentEvent::Complete).unwrap();
        assert_eq!(json, r#"{"type":"complete"}"#);
    }

    #[test]
    fn error_round_trips() {
        let json = r#"{"type":"error","message":"provider timed out"}"#;
        let event: AgentEvent = serde_json::from_str(json).unwrap();
        match event {
            AgentEvent::Error { ref message } => assert_eq!(message, "provider timed out"),
            _ => panic!("wrong variant"),
        }
        assert_eq!(serde_json::to_string(&event).unwrap(), json);
    }

    #[test]
    fn event_type_names() {
        assert_eq!(
            AgentEvent::ToolCall {
                tool_name: "x".into(),
                parameters: serde_json::Value::Null,
            }
            .event_type(),
            "tool_call"
        );
        assert_eq!(
            AgentEvent::AssistantMessage {
                content: "x".into(),
                is_complete: true,
            }
            .event_type(),
            "assistant_message"
        );
        assert_eq!(
            AgentEvent::Error { message: "x".into() }.event_type(),
            "error"
        );
        assert_eq!(AgentEvent::Complete.event_type(), "complete");
    }
}
