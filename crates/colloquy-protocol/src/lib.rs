//! Wire types shared between the orchestrator, tools, and the provider client.

mod tool;

pub use tool::ToolError;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Speaker role attached to a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions for the agent.
    System,
    /// User-authored message.
    User,
    /// Assistant-authored message, possibly carrying tool-call requests.
    Assistant,
    /// Tool result answering a specific tool-call request.
    Tool,
}

impl Role {
    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        }
    }
}

/// Function payload inside a tool-call request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionCall {
    /// Tool identifier as advertised to the provider.
    pub name: String,
    /// JSON-encoded argument payload, not yet validated.
    pub arguments: String,
}

/// A single tool invocation requested by the provider.
///
/// The call id is assigned remotely and must be echoed back verbatim on the
/// matching tool-role turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolCallRequest {
    /// Opaque call identifier assigned by the provider.
    pub id: String,
    /// Call kind, `function` for every provider currently supported.
    #[serde(rename = "type", default = "default_call_type")]
    pub call_type: String,
    /// Requested function name and raw arguments.
    pub function: FunctionCall,
}

fn default_call_type() -> String {
    "function".to_string()
}

impl ToolCallRequest {
    /// Build a function call request.
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: default_call_type(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

/// Outcome of one tool invocation.
///
/// Every `ToolCallRequest` produces exactly one result, success or not. A
/// failed invocation carries `{success: false, error, tool}` as its payload so
/// the provider still receives a well-formed tool turn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallResult {
    /// Call identifier echoed from the request.
    pub call_id: String,
    /// Tool identifier the request named.
    pub tool: String,
    /// Whether the invocation succeeded.
    pub success: bool,
    /// Structured success payload, or the error envelope on failure.
    pub payload: Value,
}

impl ToolCallResult {
    /// Build a successful result with the tool's own payload.
    pub fn ok(call_id: impl Into<String>, tool: impl Into<String>, payload: Value) -> Self {
        Self {
            call_id: call_id.into(),
            tool: tool.into(),
            success: true,
            payload,
        }
    }

    /// Build a failed result wrapping the error message.
    pub fn failed(
        call_id: impl Into<String>,
        tool: impl Into<String>,
        error: impl std::fmt::Display,
    ) -> Self {
        let tool = tool.into();
        let payload = serde_json::json!({
            "success": false,
            "error": error.to_string(),
            "tool": tool,
        });
        Self {
            call_id: call_id.into(),
            tool,
            success: false,
            payload,
        }
    }

    /// Serialize the payload for a tool-role turn.
    pub fn to_content(&self) -> String {
        serde_json::to_string(&self.payload).unwrap_or_else(|_| "null".to_string())
    }
}

/// One role-tagged turn in the conversation context.
///
/// Ordering is significant: the provider is sensitive to both role semantics
/// and the relative position of tool-call and tool-result turns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    /// Role that produced the turn.
    pub role: Role,
    /// Text content, or a serialized tool result for tool-role turns.
    pub content: String,
    /// Call identifier answered by a tool-role turn.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tool_call_id: Option<String>,
    /// Tool calls requested by an assistant turn.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tool_calls: Option<Vec<ToolCallRequest>>,
}

impl ChatTurn {
    /// Build a system turn.
    pub fn system(content: impl Into<String>) -> Self {
        Self::plain(Role::System, content)
    }

    /// Build a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::plain(Role::User, content)
    }

    /// Build a plain assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::plain(Role::Assistant, content)
    }

    /// Build an assistant turn carrying tool-call requests.
    pub fn assistant_tool_calls(
        content: impl Into<String>,
        tool_calls: Vec<ToolCallRequest>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_call_id: None,
            tool_calls: Some(tool_calls),
        }
    }

    /// Build a tool-role turn answering the given call id.
    pub fn tool(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_call_id: Some(call_id.into()),
            tool_calls: None,
        }
    }

    fn plain(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_call_id: None,
            tool_calls: None,
        }
    }
}
