//! Tool model — specs, invocations, results, and the validating registry.
//!
//! Tools are what let the agent act on the authorization workflow: probe a
//! device, run the test, generate a report, persist a record, query history.
//! The set of tools is fixed for the lifetime of an agent instance.
//!
//! Model-produced arguments are never trusted: the registry validates them
//! against the declared `ToolSpec` before dispatch and turns mismatches into
//! structured `invalid_arguments` failures the model can recover from.

use crate::error::ToolError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The JSON type of a single tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Integer,
    Array,
}

impl ParamKind {
    /// The JSON-Schema type keyword for this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Array => "array",
        }
    }

    fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Array => value.is_array(),
        }
    }
}

/// Static description of one tool parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub required: bool,
    pub description: String,
    /// Default applied by the tool itself when the argument is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl ParamSpec {
    pub fn required(name: &str, kind: ParamKind, description: &str) -> Self {
        Self {
            name: name.into(),
            kind,
            required: true,
            description: description.into(),
            default: None,
        }
    }

    pub fn optional(name: &str, kind: ParamKind, description: &str) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            description: description.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// Static description of one callable tool — what the model sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Unique tool name
    pub name: String,

    /// Description sent to the model
    pub description: String,

    /// Ordered parameter declarations
    pub params: Vec<ParamSpec>,
}

impl ToolSpec {
    /// Render the parameters as a JSON-Schema object for the provider wire
    /// format (OpenAI-style function calling).
    pub fn parameters_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        let mut required = Vec::new();

        for p in &self.params {
            let mut prop = serde_json::Map::new();
            prop.insert("type".into(), p.kind.type_name().into());
            prop.insert("description".into(), p.description.clone().into());
            if let Some(default) = &p.default {
                prop.insert("default".into(), default.clone());
            }
            properties.insert(p.name.clone(), serde_json::Value::Object(prop));
            if p.required {
                required.push(serde_json::Value::String(p.name.clone()));
            }
        }

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Check model-produced arguments against this spec.
    ///
    /// Returns the list of problems found, empty when the arguments pass.
    pub fn validate(&self, arguments: &serde_json::Value) -> Vec<String> {
        let mut problems = Vec::new();

        let Some(map) = arguments.as_object() else {
            return vec![format!(
                "arguments must be a JSON object, got {arguments}"
            )];
        };

        for p in &self.params {
            match map.get(&p.name) {
                None | Some(serde_json::Value::Null) => {
                    if p.required {
                        problems.push(format!("missing required parameter '{}'", p.name));
                    }
                }
                Some(value) => {
                    if !p.kind.matches(value) {
                        problems.push(format!(
                            "parameter '{}' must be of type {}, got {value}",
                            p.name,
                            p.kind.type_name()
                        ));
                    }
                }
            }
        }

        problems
    }
}

/// One requested tool call: created per model response, consumed immediately
/// by execution, never persisted standalone.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    /// The model's call id (links the eventual tool-result message back)
    pub call_id: String,

    /// Requested tool name — may or may not match a registered spec
    pub tool_name: String,

    /// Arguments as parsed JSON
    pub arguments: serde_json::Value,
}

/// The failure detail of a tool result.
///
/// The original workflow emits both bare strings ("authentication failed")
/// and structured objects (code + message + suggestion); both shapes are
/// kept so the model sees the same narrative either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolFailure {
    Structured {
        code: String,
        message: String,
        suggestion: String,
    },
    Simple(String),
}

/// The result of executing one tool invocation.
///
/// Exactly one result per invocation; always serializable to JSON text for
/// insertion back into the transcript as a tool-role message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the tool accomplished its task
    pub success: bool,

    /// Structured payload on success (tool-specific keys)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Human-readable summary
    pub message: String,

    /// Failure detail, present when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolFailure>,
}

impl ToolResult {
    /// A successful result with a structured payload.
    pub fn ok(data: serde_json::Value, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: message.into(),
            error: None,
        }
    }

    /// A domain failure with a bare-string error.
    pub fn fail(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: message.into(),
            error: Some(ToolFailure::Simple(error.into())),
        }
    }

    /// A domain failure with a structured error (code + suggestion).
    pub fn fail_structured(
        code: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> Self {
        let message = message.into();
        Self {
            success: false,
            data: None,
            message: message.clone(),
            error: Some(ToolFailure::Structured {
                code: code.into(),
                message,
                suggestion: suggestion.into(),
            }),
        }
    }

    /// The failure fed back to the model when its arguments don't match
    /// the declared schema.
    pub fn invalid_arguments(tool_name: &str, problems: &[String]) -> Self {
        Self::fail_structured(
            "INVALID_ARGUMENTS",
            format!("invalid arguments for '{tool_name}': {}", problems.join("; ")),
            "correct the arguments to match the tool's parameter schema and call it again",
        )
    }

    /// Serialize for transcript insertion. Falls back to a plain failure
    /// string if serialization itself fails (it cannot for these types, but
    /// the transcript must never be left without a tool result).
    pub fn to_transcript_content(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!(r#"{{"success":false,"message":"unserializable tool result: {e}"}}"#))
    }
}

/// The core Tool trait.
///
/// Execution is infallible at the type level: domain failures are expressed
/// as `success = false` results, so a misbehaving downstream never tears the
/// agent loop down.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The unique name of this tool (e.g., "check_device_connection").
    fn name(&self) -> &str;

    /// The full spec sent to the model.
    fn spec(&self) -> ToolSpec;

    /// Execute the tool with validated arguments.
    async fn execute(&self, arguments: serde_json::Value) -> ToolResult;
}

/// The fixed registry of available tools.
///
/// The agent loop uses this to:
/// 1. Collect tool specs to send to the model
/// 2. Validate and execute invocations when the model requests them
///
/// The tool set is immutable after construction and safely shared across
/// concurrent runs.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        let name = tool.name().to_string();
        if let Some(&pos) = self.index.get(&name) {
            self.tools[pos] = tool;
        } else {
            self.index.insert(name, self.tools.len());
            self.tools.push(tool);
        }
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.index.get(name).map(|&pos| self.tools[pos].as_ref())
    }

    /// All tool specs, in registration order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    /// All registered tool names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Validate and execute one invocation.
    ///
    /// `Err(ToolError::Unknown)` is the only error path; schema mismatches
    /// come back as an `invalid_arguments` failure result so the model can
    /// correct itself.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> std::result::Result<ToolResult, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::Unknown(name.to_string()))?;

        let problems = tool.spec().validate(&arguments);
        if !problems.is_empty() {
            tracing::warn!(tool = name, ?problems, "Rejecting invocation with invalid arguments");
            return Ok(ToolResult::invalid_arguments(name, &problems));
        }

        Ok(tool.execute(arguments).await)
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
