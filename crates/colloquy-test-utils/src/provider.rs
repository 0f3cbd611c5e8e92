//! Scripted provider doubles for orchestrator tests.

use async_trait::async_trait;
use colloquy_protocol::ToolCallRequest;
use colloquy_provider::{
    Choice, CompletionProvider, CompletionRequest, CompletionResponse, ProviderError,
    ResponseMessage,
};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Provider that replays a fixed script of responses and records every
/// request it receives.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<CompletionResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    /// Create a provider that will serve the given responses in order.
    pub fn new(responses: Vec<CompletionResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// All requests received so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().clone()
    }

    /// Number of calls made against this provider.
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        self.requests.lock().push(request.clone());
        self.responses
            .lock()
            .pop_front()
            .ok_or_else(|| ProviderError::Decode("scripted responses exhausted".to_string()))
    }
}

/// Provider that fails every call with an HTTP-style status error.
pub struct FailingProvider {
    message: String,
}

impl FailingProvider {
    /// Create a provider that fails with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl CompletionProvider for FailingProvider {
    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        Err(ProviderError::Status {
            status: 500,
            message: self.message.clone(),
        })
    }
}

/// Build a response carrying only text content.
pub fn text_response(text: &str) -> CompletionResponse {
    CompletionResponse {
        choices: vec![Choice {
            message: ResponseMessage {
                content: Some(text.to_string()),
                tool_calls: None,
            },
        }],
    }
}

/// Build a response requesting the given tool calls with no text.
pub fn tool_call_response(calls: Vec<ToolCallRequest>) -> CompletionResponse {
    CompletionResponse {
        choices: vec![Choice {
            message: ResponseMessage {
                content: None,
                tool_calls: Some(calls),
            },
        }],
    }
}

/// Build a response with no choices at all.
pub fn empty_response() -> CompletionResponse {
    CompletionResponse { choices: vec![] }
}
