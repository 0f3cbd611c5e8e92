//! Configuration schema for colloquy.

use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Root config for the colloquy orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ColloquyConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

impl ColloquyConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> ColloquyConfigBuilder {
        ColloquyConfigBuilder::new()
    }

    /// Validate field-level constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.provider.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.provider.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidField {
                path: "provider.base_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(ConfigError::InvalidField {
                path: "provider.temperature".to_string(),
                message: "must be between 0.0 and 2.0".to_string(),
            });
        }
        if self.orchestrator.history_window == 0 {
            return Err(ConfigError::InvalidField {
                path: "orchestrator.history_window".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for assembling a `ColloquyConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct ColloquyConfigBuilder {
    config: ColloquyConfig,
}

impl ColloquyConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: ColloquyConfig::default(),
        }
    }

    /// Replace the provider configuration.
    pub fn provider(mut self, provider: ProviderConfig) -> Self {
        self.config.provider = provider;
        self
    }

    /// Replace the orchestrator configuration.
    pub fn orchestrator(mut self, orchestrator: OrchestratorConfig) -> Self {
        self.config.orchestrator = orchestrator;
        self
    }

    /// Set the provider API key.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config.provider.api_key = api_key.into();
        self
    }

    /// Set the default completion model.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.provider.model = model.into();
        self
    }

    /// Finalize and return the built `ColloquyConfig`.
    pub fn build(self) -> ColloquyConfig {
        self.config
    }
}

/// Remote completion provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key sent as a bearer token.
    #[serde(default)]
    pub api_key: String,
    /// Base URL for the chat-completions endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Default model when the agent does not override it.
    #[serde(default = "default_model")]
    pub model: String,
    /// Completion token budget per call.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Timeout for plain completion calls, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Timeout for tool-augmented completion calls, in seconds.
    #[serde(default = "default_tool_request_timeout_secs")]
    pub tool_request_timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
            tool_request_timeout_secs: default_tool_request_timeout_secs(),
        }
    }
}

/// Orchestrator tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// How many prior history turns are included in the context.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_temperature() -> f32 {
    0.7
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_tool_request_timeout_secs() -> u64 {
    60
}

fn default_history_window() -> usize {
    10
}
