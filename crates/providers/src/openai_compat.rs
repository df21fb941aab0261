//! OpenAI-compatible provider implementation.
//!
//! Works with DeepSeek, OpenAI, and any backend exposing an
//! OpenAI-compatible `/v1/chat/completions` endpoint with tool calling.
//! One request, one complete response: the agent loop has no use for token
//! streaming, and retry policy belongs to the caller (there is none).

use async_trait::async_trait;
use authproof_core::error::ProviderError;
use authproof_core::message::{Message, MessageToolCall, Role};
use authproof_core::provider::{ChatRequest, ChatResponse, Provider, Usage};
use authproof_core::tool::ToolSpec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// An OpenAI-compatible chat-completion client.
pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new OpenAI-compatible provider.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {e}")))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Create a DeepSeek provider (convenience constructor).
    pub fn deepseek(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        Self::new("deepseek", "https://api.deepseek.com/v1", api_key)
    }

    /// Convert our Message types to the OpenAI wire format.
    fn to_api_messages(messages: &[Message]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    Role::System => "system".into(),
                    Role::User => "user".into(),
                    Role::Assistant => "assistant".into(),
                    Role::Tool => "tool".into(),
                },
                content: Some(m.content.clone()),
                tool_calls: if m.tool_calls.is_empty() {
                    None
                } else {
                    Some(
                        m.tool_calls
                            .iter()
                            .map(|tc| ApiToolCall {
                                id: tc.id.clone(),
                                r#type: "function".into(),
                                function: ApiFunction {
                                    name: tc.name.clone(),
                                    arguments: tc.arguments.clone(),
                                },
                            })
                            .collect(),
                    )
                },
                tool_call_id: m.tool_call_id.clone(),
            })
            .collect()
    }

    /// Convert tool specs to the OpenAI function-calling format.
    fn to_api_tools(tools: &[ToolSpec]) -> Vec<ApiToolDefinition> {
        tools
            .iter()
            .map(|t| ApiToolDefinition {
                r#type: "function".into(),
                function: ApiToolFunction {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: t.parameters_schema(),
                },
            })
            .collect()
    }

    fn parse_response(api_response: ApiResponse) -> Result<ChatResponse, ProviderError> {
        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ApiError {
                status_code: 200,
                message: "No choices in response".into(),
            })?;

        let tool_calls: Vec<MessageToolCall> = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| MessageToolCall {
                id: tc.id,
                name: tc.function.name,
                arguments: tc.function.arguments,
            })
            .collect();

        let mut message = Message::assistant(choice.message.content.unwrap_or_default());
        message.tool_calls = tool_calls;

        let usage = api_response.usage.map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ChatResponse {
            message,
            usage,
            model: api_response.model,
        })
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut body = serde_json::json!({
            "model": request.model,
            "messages": Self::to_api_messages(&request.messages),
            "temperature": request.temperature,
            "stream": false,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if !request.tools.is_empty() {
            body["tools"] = serde_json::json!(Self::to_api_tools(&request.tools));
        }

        debug!(provider = %self.name, model = %request.model, messages = request.messages.len(), "Sending completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(e.to_string())
                } else {
                    ProviderError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ProviderError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status == 401 || status == 403 {
            return Err(ProviderError::AuthenticationFailed(
                "Invalid API key or insufficient permissions".into(),
            ));
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiResponse =
            response.json().await.map_err(|e| ProviderError::ApiError {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        Self::parse_response(api_response)
    }

    async fn health_check(&self) -> Result<bool, ProviderError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolCall {
    id: String,
    r#type: String,
    function: ApiFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiFunction {
    name: String,
    arguments: String,
}

#[derive(Debug, Serialize)]
struct ApiToolDefinition {
    r#type: String,
    function: ApiToolFunction,
}

#[derive(Debug, Serialize)]
struct ApiToolFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    model: String,
    choices: Vec<ApiChoice>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use authproof_core::tool::{ParamKind, ParamSpec};

    #[test]
    fn deepseek_constructor() {
        let provider = OpenAiCompatProvider::deepseek("sk-test").unwrap();
        assert_eq!(provider.name(), "deepseek");
        assert!(provider.base_url.contains("api.deepseek.com"));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let provider =
            OpenAiCompatProvider::new("custom", "https://example.com/v1/", "k").unwrap();
        assert_eq!(provider.base_url, "https://example.com/v1");
    }

    #[test]
    fn message_conversion() {
        let messages = vec![
            Message::system("You are a test assistant"),
            Message::user("Check device 192.168.1.100"),
        ];
        let api_messages = OpenAiCompatProvider::to_api_messages(&messages);
        assert_eq!(api_messages.len(), 2);
        assert_eq!(api_messages[0].role, "system");
        assert_eq!(api_messages[1].role, "user");
    }

    #[test]
    fn message_conversion_with_tool_calls() {
        let mut msg = Message::assistant("");
        msg.tool_calls = vec![MessageToolCall {
            id: "call_1".into(),
            name: "check_device_connection".into(),
            arguments: r#"{"device_ip":"192.168.1.100"}"#.into(),
        }];
        let api_msgs = OpenAiCompatProvider::to_api_messages(&[msg]);
        let tc = api_msgs[0].tool_calls.as_ref().unwrap();
        assert_eq!(tc.len(), 1);
        assert_eq!(tc[0].function.name, "check_device_connection");
        assert_eq!(tc[0].r#type, "function");
    }

    #[test]
    fn message_conversion_tool_response() {
        let msg = Message::tool_result("call_1", "check_device_connection", "result data");
        let api_msgs = OpenAiCompatProvider::to_api_messages(&[msg]);
        assert_eq!(api_msgs[0].role, "tool");
        assert_eq!(api_msgs[0].tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn tool_spec_conversion() {
        let specs = vec![ToolSpec {
            name: "generate_test_report".into(),
            description: "Generate a test acceptance report".into(),
            params: vec![ParamSpec::required(
                "test_id",
                ParamKind::String,
                "Test task id",
            )],
        }];
        let api_tools = OpenAiCompatProvider::to_api_tools(&specs);
        assert_eq!(api_tools.len(), 1);
        assert_eq!(api_tools[0].function.name, "generate_test_report");
        assert_eq!(api_tools[0].function.parameters["type"], "object");
    }

    #[test]
    fn parse_final_answer_response() {
        let raw = r#"{
            "model": "deepseek-chat",
            "choices": [{"message": {"role": "assistant", "content": "All steps passed."}}],
            "usage": {"prompt_tokens": 100, "completion_tokens": 12, "total_tokens": 112}
        }"#;
        let api: ApiResponse = serde_json::from_str(raw).unwrap();
        let resp = OpenAiCompatProvider::parse_response(api).unwrap();
        assert_eq!(resp.message.content, "All steps passed.");
        assert!(resp.message.tool_calls.is_empty());
        assert_eq!(resp.usage.unwrap().total_tokens, 112);
    }

    #[test]
    fn parse_tool_call_response() {
        let raw = r#"{
            "model": "deepseek-chat",
            "choices": [{"message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_abc",
                    "type": "function",
                    "function": {"name": "execute_auth_test", "arguments": "{\"device_ip\":\"192.168.1.100\"}"}
                }]
            }}],
            "usage": null
        }"#;
        let api: ApiResponse = serde_json::from_str(raw).unwrap();
        let resp = OpenAiCompatProvider::parse_response(api).unwrap();
        assert!(resp.message.requests_tools());
        assert_eq!(resp.message.tool_calls[0].name, "execute_auth_test");
        assert_eq!(resp.message.content, "");
    }

    #[test]
    fn parse_empty_choices_is_error() {
        let api: ApiResponse =
            serde_json::from_str(r#"{"model":"m","choices":[],"usage":null}"#).unwrap();
        let err = OpenAiCompatProvider::parse_response(api).unwrap_err();
        assert!(matches!(err, ProviderError::ApiError { .. }));
    }
}
