//! Tool trait definition and catalog metadata.

use crate::schema::ToolSchema;
use async_trait::async_trait;
use colloquy_protocol::ToolError;
use serde_json::{Map, Value};
use std::fmt::Debug;

/// Interface for executable tool capabilities.
///
/// Implementations are registered once at startup and treated as immutable;
/// `invoke` receives arguments that already passed schema validation.
#[async_trait]
pub trait Tool: Send + Sync + Debug {
    /// Internal tool name, unique within a registry.
    fn name(&self) -> &str;
    /// Human-readable description shown to the model.
    fn description(&self) -> &str;
    /// Declared parameter schema.
    fn schema(&self) -> ToolSchema;

    /// Execute the capability with validated arguments.
    async fn invoke(&self, args: &Map<String, Value>) -> Result<Value, ToolError>;
}

/// Discovery entry describing one registered tool.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CatalogEntry {
    /// Internal tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
    /// Declared parameters as a JSON properties object.
    pub parameters: Value,
}
