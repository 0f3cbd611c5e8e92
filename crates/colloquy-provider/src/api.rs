//! Request and response bodies for the chat-completions endpoint.

use colloquy_protocol::{ChatTurn, ToolCallRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body for one completion call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionRequest {
    /// Target model identifier.
    pub model: String,
    /// Ordered conversation context.
    pub messages: Vec<ChatTurn>,
    /// Completion token budget.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Advertised tool schemas, omitted when the agent has no tools.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tools: Option<Vec<Value>>,
    /// Tool selection mode, `auto` whenever tools are present.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tool_choice: Option<String>,
}

impl CompletionRequest {
    /// Whether this request advertises any tools.
    pub fn has_tools(&self) -> bool {
        self.tools.as_ref().is_some_and(|tools| !tools.is_empty())
    }
}

/// Response body for one completion call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionResponse {
    /// Candidate completions; only the first is consulted.
    pub choices: Vec<Choice>,
}

impl CompletionResponse {
    /// Return the primary message, if the provider produced one.
    pub fn primary_message(&self) -> Option<&ResponseMessage> {
        self.choices.first().map(|choice| &choice.message)
    }
}

/// One candidate completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Choice {
    /// Message produced for this candidate.
    pub message: ResponseMessage,
}

/// Assistant message returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResponseMessage {
    /// Text content; absent when the message only requests tool calls.
    #[serde(default)]
    pub content: Option<String>,
    /// Tool invocations the model wants executed.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tool_calls: Option<Vec<ToolCallRequest>>,
}

impl ResponseMessage {
    /// Tool calls requested by this message, empty when none.
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        self.tool_calls.as_deref().unwrap_or_default()
    }

    /// Text content with surrounding whitespace removed.
    pub fn text(&self) -> String {
        self.content.as_deref().unwrap_or_default().trim().to_string()
    }

    /// Convert into an assistant context turn, preserving tool calls verbatim.
    pub fn to_turn(&self) -> ChatTurn {
        let content = self.content.clone().unwrap_or_default();
        match &self.tool_calls {
            Some(calls) if !calls.is_empty() => {
                ChatTurn::assistant_tool_calls(content, calls.clone())
            }
            _ => ChatTurn::assistant(content),
        }
    }
}
