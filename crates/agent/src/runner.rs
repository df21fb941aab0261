//! The agent loop implementation.

use std::sync::Arc;

use authproof_core::agent::AgentConfig;
use authproof_core::error::ToolError;
use authproof_core::message::{Conversation, Message};
use authproof_core::provider::{ChatRequest, Provider};
use authproof_core::tool::{ToolInvocation, ToolRegistry, ToolResult};
use tracing::{debug, info, warn};

use crate::event::AgentEvent;
use crate::prompt::DEFAULT_SYSTEM_PROMPT;
use crate::sink::EventSink;

/// How a run ended. Every run reaches exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The model produced a final answer; `complete` was emitted.
    Completed,

    /// A provider call failed; one `error` event was emitted and the run
    /// stopped without retrying.
    ProviderFailed,

    /// The model kept requesting tools until the round bound was hit.
    MaxRoundsExceeded,
}

/// Drives one conversation turn to completion.
///
/// The runner owns no transport and no storage: input arrives as a user
/// message, output leaves through the [`EventSink`], and the conversation
/// transcript is mutated in place so the caller can persist it afterwards.
pub struct AgentRunner {
    /// The model backend
    provider: Arc<dyn Provider>,

    /// The fixed tool registry
    tools: Arc<ToolRegistry>,

    /// Model and loop settings
    config: AgentConfig,

    /// Attached once per conversation
    system_prompt: String,
}

impl AgentRunner {
    pub fn new(provider: Arc<dyn Provider>, tools: Arc<ToolRegistry>, config: AgentConfig) -> Self {
        Self {
            provider,
            tools,
            config,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Replace the default system prompt.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Process one user message and drive the loop until a terminal state.
    ///
    /// Emission order is fixed: `tool_call` events in model order for every
    /// tool turn, then either `assistant_message` + `complete` (success) or
    /// a single `error` (provider failure / round bound). The transcript is
    /// appended in the same order the model saw it.
    pub async fn run(
        &self,
        conversation: &mut Conversation,
        user_message: impl Into<String>,
        sink: &dyn EventSink,
    ) -> RunOutcome {
        conversation.attach_system_prompt(&self.system_prompt);
        conversation.push(Message::user(user_message));

        info!(
            conversation_id = %conversation.id,
            messages = conversation.messages.len(),
            "Starting run"
        );

        let tool_specs = self.tools.specs();
        let mut round = 0u32;

        loop {
            round += 1;
            if round > self.config.max_rounds {
                warn!(
                    conversation_id = %conversation.id,
                    max_rounds = self.config.max_rounds,
                    "Round bound reached without a final answer"
                );
                sink.emit(AgentEvent::Error {
                    message: format!(
                        "run aborted: no final answer after {} model rounds",
                        self.config.max_rounds
                    ),
                });
                return RunOutcome::MaxRoundsExceeded;
            }

            debug!(conversation_id = %conversation.id, round, "Model round");

            let request = ChatRequest {
                model: self.config.model.clone(),
                messages: conversation.messages.clone(),
                temperature: self.config.temperature,
                max_tokens: self.config.max_tokens,
                tools: tool_specs.clone(),
            };

            let response = match self.provider.complete(request).await {
                Ok(response) => response,
                Err(e) => {
                    warn!(
                        conversation_id = %conversation.id,
                        provider = self.provider.name(),
                        error = %e,
                        "Provider call failed"
                    );
                    sink.emit(AgentEvent::Error {
                        message: e.to_string(),
                    });
                    return RunOutcome::ProviderFailed;
                }
            };

            if let Some(usage) = &response.usage {
                debug!(
                    model = %response.model,
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    total_tokens = usage.total_tokens,
                    "Token usage"
                );
            }

            if !response.message.requests_tools() {
                let content = response.message.content.clone();
                conversation.push(response.message);
                sink.emit(AgentEvent::AssistantMessage {
                    content,
                    is_complete: true,
                });
                sink.emit(AgentEvent::Complete);
                return RunOutcome::Completed;
            }

            // Tool turn. Arguments that are not valid JSON degrade to an
            // empty object; the registry's schema check reports what is
            // missing and the model gets to correct itself.
            let invocations: Vec<ToolInvocation> = response
                .message
                .tool_calls
                .iter()
                .map(|tc| ToolInvocation {
                    call_id: tc.id.clone(),
                    tool_name: tc.name.clone(),
                    arguments: serde_json::from_str(&tc.arguments)
                        .unwrap_or_else(|_| serde_json::json!({})),
                })
                .collect();

            for invocation in &invocations {
                sink.emit(AgentEvent::ToolCall {
                    tool_name: invocation.tool_name.clone(),
                    parameters: invocation.arguments.clone(),
                });
            }

            conversation.push(response.message);

            for invocation in invocations {
                let result = match self
                    .tools
                    .invoke(&invocation.tool_name, invocation.arguments)
                    .await
                {
                    Ok(result) => result,
                    Err(ToolError::Unknown(name)) => {
                        warn!(tool = %name, "Model requested an unregistered tool");
                        ToolResult::fail_structured(
                            "UNKNOWN_TOOL",
                            format!("no tool named '{name}' is available"),
                            "call one of the registered tools listed in your instructions",
                        )
                    }
                };

                if !result.success {
                    debug!(
                        tool = %invocation.tool_name,
                        message = %result.message,
                        "Tool reported failure"
                    );
                }

                conversation.push(Message::tool_result(
                    invocation.call_id,
                    invocation.tool_name,
                    result.to_transcript_content(),
                ));
            }
        }
    }
}
