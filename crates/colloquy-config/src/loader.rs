//! Config loading from files and the process environment.

use crate::{ColloquyConfig, ConfigError};
use log::debug;
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable carrying the provider API key.
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
/// Environment variable overriding the default model.
pub const ENV_MODEL: &str = "OPENAI_MODEL";
/// Environment variable overriding the completion token budget.
pub const ENV_MAX_TOKENS: &str = "OPENAI_MAX_TOKENS";
/// Environment variable overriding the sampling temperature.
pub const ENV_TEMPERATURE: &str = "OPENAI_TEMPERATURE";
/// Environment variable overriding the provider base URL.
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";

impl ColloquyConfig {
    /// Load config from a JSON5 file. Environment overrides are not applied.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("loading config file (path={})", path.display());
        let contents = fs::read_to_string(path)?;
        let config: ColloquyConfig = json5::from_str(&contents)?;
        Ok(config)
    }

    /// Load config from a file if present, then apply environment overrides.
    pub fn load_layered(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Build config purely from environment variables and defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load_layered(None)
    }

    /// Overlay recognized environment variables onto this config.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(api_key) = env::var(ENV_API_KEY) {
            self.provider.api_key = api_key;
        }
        if let Ok(model) = env::var(ENV_MODEL) {
            self.provider.model = model;
        }
        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            self.provider.base_url = base_url;
        }
        if let Ok(max_tokens) = env::var(ENV_MAX_TOKENS) {
            self.provider.max_tokens =
                max_tokens
                    .parse()
                    .map_err(|_| ConfigError::InvalidField {
                        path: "provider.max_tokens".to_string(),
                        message: format!("not an integer: {max_tokens}"),
                    })?;
        }
        if let Ok(temperature) = env::var(ENV_TEMPERATURE) {
            self.provider.temperature =
                temperature
                    .parse()
                    .map_err(|_| ConfigError::InvalidField {
                        path: "provider.temperature".to_string(),
                        message: format!("not a number: {temperature}"),
                    })?;
        }
        Ok(())
    }
}
