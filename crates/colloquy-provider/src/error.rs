//! Error types for provider calls.

use thiserror::Error;

/// Errors raised while talking to the remote completion provider.
///
/// Any of these aborts the turn that issued the call; tool failures never
/// surface here.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network-level failure, including timeouts.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-2xx response from the provider.
    #[error("provider error (status={status}): {message}")]
    Status { status: u16, message: String },
    /// Response body did not match the expected structure.
    #[error("failed to decode provider response: {0}")]
    Decode(String),
}
