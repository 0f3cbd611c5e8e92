/// Errors raised while registering, resolving, or running tools.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// Tool identifier was not found in the registry.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    /// Tool identifier is already registered.
    #[error("duplicate tool: {0}")]
    DuplicateTool(String),
    /// Tool arguments failed schema validation.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    /// Tool execution itself failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}
