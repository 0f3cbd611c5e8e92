//! HTTP client for OpenAI-compatible chat-completion providers.

use crate::api::{CompletionRequest, CompletionResponse};
use crate::error::ProviderError;
use async_trait::async_trait;
use colloquy_config::ProviderConfig;
use log::debug;
use std::time::Duration;

/// Remote completion provider interface.
///
/// The orchestrator only depends on this trait; tests substitute scripted
/// implementations.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Issue one completion call and return the decoded response.
    async fn complete(&self, request: &CompletionRequest)
    -> Result<CompletionResponse, ProviderError>;
}

/// `reqwest`-backed client for the `/chat/completions` endpoint.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    /// Timeout for plain completion calls.
    request_timeout: Duration,
    /// Longer timeout for tool-augmented calls.
    tool_request_timeout: Duration,
}

impl OpenAiClient {
    /// Build a client from provider config.
    pub fn new(config: &ProviderConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            tool_request_timeout: Duration::from_secs(config.tool_request_timeout_secs),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let timeout = if request.has_tools() {
            self.tool_request_timeout
        } else {
            self.request_timeout
        };
        debug!(
            "sending completion request (model={}, messages={}, tools={}, timeout_secs={})",
            request.model,
            request.messages.len(),
            request.tools.as_ref().map(Vec::len).unwrap_or(0),
            timeout.as_secs(),
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: extract_error_message(status.as_u16(), &body),
            });
        }

        serde_json::from_slice(&body).map_err(|err| ProviderError::Decode(err.to_string()))
    }
}

/// Pull the provider's error message out of a failure body.
///
/// Falls back to the bare HTTP status when the body is not the expected
/// `{error: {message}}` envelope.
fn extract_error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP error: {status}"))
}
