//! Configuration models and loading for the colloquy workspace.
//!
//! This crate owns the config schema, validation, and the file/env loading
//! used by both the library facade and the CLI.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Environment variable names recognized by the loader.
pub use loader::{ENV_API_KEY, ENV_BASE_URL, ENV_MAX_TOKENS, ENV_MODEL, ENV_TEMPERATURE};
/// Configuration schema models.
pub use model::*;
