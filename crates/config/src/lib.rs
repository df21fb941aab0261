//! Configuration loading, validation, and management for AuthProof.
//!
//! Loads configuration from `~/.authproof/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The root configuration structure.
///
/// Maps directly to `~/.authproof/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the model provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model to request
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature (the test workflow runs deterministic at 0.0)
    #[serde(default)]
    pub temperature: f32,

    /// Maximum tokens per model response (provider default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Agent loop settings
    #[serde(default)]
    pub agent: AgentSection,

    /// Conversation store settings
    #[serde(default)]
    pub store: StoreSection,
}

/// Agent loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSection {
    /// Maximum model rounds per run
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
}

/// Conversation store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    /// Backend: "file" or "memory"
    #[serde(default = "default_store_backend")]
    pub backend: String,

    /// File path for the file backend; defaults next to the config file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://api.deepseek.com/v1".into()
}
fn default_model() -> String {
    "deepseek-chat".into()
}
fn default_max_rounds() -> u32 {
    25
}
fn default_store_backend() -> String {
    "file".into()
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
        }
    }
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            path: None,
        }
    }
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("agent", &self.agent)
            .field("store", &self.store)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.authproof/config.toml).
    ///
    /// Also checks environment variables for the API key:
    /// - `AUTHPROOF_API_KEY` (highest priority)
    /// - `DEEPSEEK_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if config.api_key.is_none() {
            config.api_key = std::env::var("AUTHPROOF_API_KEY")
                .ok()
                .or_else(|| std::env::var("DEEPSEEK_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("AUTHPROOF_MODEL") {
            config.model = model;
        }

        if let Ok(base_url) = std::env::var("AUTHPROOF_BASE_URL") {
            config.base_url = base_url;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".authproof")
    }

    /// Resolved path of the conversation store file.
    pub fn store_path(&self) -> PathBuf {
        self.store
            .path
            .clone()
            .unwrap_or_else(|| Self::config_dir().join("conversations.jsonl"))
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.agent.max_rounds == 0 {
            return Err(ConfigError::ValidationError(
                "agent.max_rounds must be at least 1".into(),
            ));
        }

        if !matches!(self.store.backend.as_str(), "file" | "memory") {
            return Err(ConfigError::ValidationError(format!(
                "unknown store backend '{}'; expected \"file\" or \"memory\"",
                self.store.backend
            )));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: 0.0,
            max_tokens: None,
            agent: AgentSection::default(),
            store: StoreSection::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.model, "deepseek-chat");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.agent.max_rounds, 25);
        assert_eq!(config.store.backend, "file");
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.model, config.model);
        assert_eq!(parsed.agent.max_rounds, config.agent.max_rounds);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            api_key = "sk-test"
            model = "deepseek-reasoner"
            "#,
        )
        .unwrap();
        assert_eq!(config.model, "deepseek-reasoner");
        assert_eq!(config.base_url, "https://api.deepseek.com/v1");
        assert_eq!(config.agent.max_rounds, 25);
        assert!(config.has_api_key());
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            temperature: 5.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_max_rounds_rejected() {
        let mut config = AppConfig::default();
        config.agent.max_rounds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_store_backend_rejected() {
        let mut config = AppConfig::default();
        config.store.backend = "postgres".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig {
            api_key: Some("sk-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
