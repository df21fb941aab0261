//! Agent configuration types.

use serde::{Deserialize, Serialize};

/// Configuration for the agent loop's behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Model to request from the provider
    pub model: String,

    /// Temperature (0.0 keeps the workflow deterministic)
    #[serde(default)]
    pub temperature: f32,

    /// Maximum tokens per model response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Maximum model rounds per run (safety bound on the tool loop)
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
}

fn default_max_rounds() -> u32 {
    25
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            model: "deepseek-chat".into(),
            temperature: 0.0,
            max_tokens: None,
            max_rounds: default_max_rounds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_bounded() {
        let cfg = AgentConfig::default();
        assert_eq!(cfg.max_rounds, 25);
        assert_eq!(cfg.temperature, 0.0);
    }

    #[test]
    fn max_rounds_defaults_when_absent_from_toml_shaped_json() {
        let cfg: AgentConfig =
            serde_json::from_str(r#"{"model":"deepseek-chat"}"#).unwrap();
        assert_eq!(cfg.max_rounds, 25);
    }
}
