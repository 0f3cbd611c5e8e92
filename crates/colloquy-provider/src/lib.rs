//! Remote completion provider interface and the OpenAI-compatible client.

mod api;
mod client;
mod error;

/// Wire types for completion calls.
pub use api::{Choice, CompletionRequest, CompletionResponse, ResponseMessage};
/// Provider trait and the HTTP client implementation.
pub use client::{CompletionProvider, OpenAiClient};
/// Provider error type.
pub use error::ProviderError;
