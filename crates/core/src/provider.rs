//! Provider trait — the abstraction over the language-model backend.
//!
//! A Provider knows how to send a transcript (plus the available tool
//! specs) to a chat-completion model and get back either a final text
//! answer or a set of requested tool invocations. Strictly one request,
//! one response — no streaming, no retries. Retry policy, if ever wanted,
//! belongs to the caller.

use crate::error::ProviderError;
use crate::message::Message;
use crate::tool::ToolSpec;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A chat-completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The model to use (e.g., "deepseek-chat")
    pub model: String,

    /// The full transcript, in order
    pub messages: Vec<Message>,

    /// Temperature (the original workflow runs deterministic at 0.0)
    #[serde(default)]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Tool specs the model may call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolSpec>,
}

/// A complete response from a provider.
///
/// The assistant message either carries tool calls (non-final) or plain
/// content (final). When a backend returns both, the tool calls are
/// authoritative and the loop treats the turn as non-final.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The generated assistant message
    pub message: Message,

    /// Token usage statistics, if the backend reports them
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The core Provider trait.
///
/// The agent loop calls `complete()` without knowing which backend is in
/// use; test code substitutes scripted implementations.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "deepseek").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(
        &self,
        request: ChatRequest,
    ) -> std::result::Result<ChatResponse, ProviderError>;

    /// Health check — can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_serializes_without_empty_tools() {
        let req = ChatRequest {
            model: "deepseek-chat".into(),
            messages: vec![Message::user("hi")],
            temperature: 0.0,
            max_tokens: None,
            tools: vec![],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("\"tools\""));
        assert!(!json.contains("max_tokens"));
    }

    #[test]
    fn usage_roundtrip() {
        let usage = Usage {
            prompt_tokens: 120,
            completion_tokens: 40,
            total_tokens: 160,
        };
        let json = serde_json::to_string(&usage).unwrap();
        let back: Usage = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_tokens, 160);
    }
}
