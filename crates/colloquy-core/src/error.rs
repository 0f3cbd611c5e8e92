//! Error types for the core orchestrator crate.

use colloquy_provider::ProviderError;
use thiserror::Error;

/// Errors surfaced to callers of `run_turn`.
///
/// Tool failures never appear here; they are folded into tool results and fed
/// back to the provider. Only provider failures and internal faults abort a
/// turn.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Remote provider call failed.
    #[error("provider call failed: {0}")]
    Provider(#[from] ProviderError),
    /// Provider response was structurally unusable.
    #[error("turn execution failed: {0}")]
    Turn(String),
    /// History store failure.
    #[error("history error: {0}")]
    History(String),
}
