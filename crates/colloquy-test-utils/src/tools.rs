//! Tool doubles for registry and orchestrator tests.

use async_trait::async_trait;
use colloquy_protocol::ToolError;
use colloquy_tools::{ParamField, ParamType, Tool, ToolSchema};
use serde_json::{Map, Value};

/// Tool that returns a fixed payload.
#[derive(Debug)]
pub struct StubTool {
    name: String,
    description: String,
    schema: ToolSchema,
    payload: Value,
}

impl StubTool {
    /// Create a schemaless stub returning the given payload.
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            description: "stub tool".to_string(),
            schema: ToolSchema::new(),
            payload,
        }
    }

    /// Add a required string parameter to the schema.
    pub fn with_required_string(mut self, name: &str) -> Self {
        self.schema = self
            .schema
            .field(ParamField::new(name, ParamType::String, "stub parameter").required());
        self
    }
}

#[async_trait]
impl Tool for StubTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> ToolSchema {
        self.schema.clone()
    }

    async fn invoke(&self, _args: &Map<String, Value>) -> Result<Value, ToolError> {
        Ok(self.payload.clone())
    }
}

/// Tool whose invocation always fails.
#[derive(Debug)]
pub struct BrokenTool {
    name: String,
    message: String,
}

impl BrokenTool {
    /// Create a tool that fails with the given message.
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[async_trait]
impl Tool for BrokenTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "always fails"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new()
    }

    async fn invoke(&self, _args: &Map<String, Value>) -> Result<Value, ToolError> {
        Err(ToolError::ExecutionFailed(self.message.clone()))
    }
}
