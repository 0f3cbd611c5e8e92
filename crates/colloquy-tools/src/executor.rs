//! Safe, single-tool invocation with schema validation.

use crate::registry::ToolRegistry;
use colloquy_protocol::{ToolCallRequest, ToolCallResult, ToolError};
use log::{debug, warn};
use serde_json::Value;
use std::sync::Arc;

/// Executes single tool invocations against a registry.
///
/// Central invariant: `execute` always returns a `ToolCallResult`, success or
/// not. Resolution, validation, and execution failures are all folded into a
/// failed result so the orchestrator has a message to append for every
/// outstanding call.
#[derive(Clone)]
pub struct ToolExecutor {
    registry: Arc<ToolRegistry>,
}

impl ToolExecutor {
    /// Create an executor over a populated registry.
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// The registry backing this executor.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Execute one provider-issued tool call.
    pub async fn execute(&self, call: &ToolCallRequest) -> ToolCallResult {
        self.execute_raw(&call.function.name, &call.id, &call.function.arguments)
            .await
    }

    /// Execute a tool by identifier with a raw JSON argument payload.
    pub async fn execute_raw(
        &self,
        tool_id: &str,
        call_id: &str,
        raw_arguments: &str,
    ) -> ToolCallResult {
        debug!(
            "executing tool call (tool={}, call_id={}, args_len={})",
            tool_id,
            call_id,
            raw_arguments.len()
        );
        match self.try_execute(tool_id, raw_arguments).await {
            Ok(payload) => ToolCallResult::ok(call_id, tool_id, payload),
            Err(err) => {
                warn!("tool call failed (tool={}, call_id={}): {}", tool_id, call_id, err);
                ToolCallResult::failed(call_id, tool_id, err)
            }
        }
    }

    async fn try_execute(&self, tool_id: &str, raw_arguments: &str) -> Result<Value, ToolError> {
        let tool = self.registry.resolve(tool_id)?;

        // Some providers send an empty arguments string for no-arg calls.
        let raw_arguments = if raw_arguments.trim().is_empty() {
            "{}"
        } else {
            raw_arguments
        };
        let decoded: Value = serde_json::from_str(raw_arguments)
            .map_err(|err| ToolError::InvalidArguments(format!("malformed arguments: {err}")))?;
        let args = decoded.as_object().ok_or_else(|| {
            ToolError::InvalidArguments("arguments must be a JSON object".to_string())
        })?;

        tool.schema().validate(args)?;
        tool.invoke(args).await
    }
}
