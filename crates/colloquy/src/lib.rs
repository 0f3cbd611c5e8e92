//! Facade crate re-exporting the colloquy workspace surface.
//!
//! Most applications only need this crate: build a [`ColloquyConfig`],
//! populate a [`ToolRegistry`], and drive turns through an [`Orchestrator`].

/// Configuration schema, loading, and validation.
pub use colloquy_config::{
    ColloquyConfig, ConfigError, OrchestratorConfig, ProviderConfig,
};
/// Agents, history, and the turn orchestrator.
pub use colloquy_core::{
    AgentProfile, CoreError, HistoryStore, MemoryHistoryStore, Orchestrator, StoredMessage,
    ThreadId,
};
/// Conversation wire types.
pub use colloquy_protocol::{
    ChatTurn, Role, ToolCallRequest, ToolCallResult, ToolError,
};
/// Provider trait and the OpenAI-compatible client.
pub use colloquy_provider::{
    CompletionProvider, CompletionRequest, CompletionResponse, OpenAiClient, ProviderError,
};
/// Tool trait, registry, executor, and built-in tools.
pub use colloquy_tools::{
    DuckDuckGoSearch, ParamField, ParamType, Tool, ToolExecutor, ToolRegistry, ToolSchema,
    WttrWeather, builtin_tool_registry, register_builtin_tools,
};
