//! Tooling interfaces, schema validation, and built-in tools for colloquy.

pub mod builtins;
pub mod executor;
pub mod net;
pub mod registry;
pub mod schema;
pub mod tool;
pub mod web;

/// Built-in tool registry and registration helpers.
pub use builtins::{builtin_tool_registry, register_builtin_tools};
/// Safe single-call executor.
pub use executor::ToolExecutor;
/// HTTP-backed network providers.
pub use net::{DuckDuckGoSearch, WttrWeather};
/// Tool registry type.
pub use registry::ToolRegistry;
/// Parameter schema types and the advertisement builder.
pub use schema::{ParamField, ParamType, ToolSchema, advertised_schema, schema_is_well_formed};
/// Tool trait and catalog entry.
pub use tool::{CatalogEntry, Tool};
/// Network provider traits for web-facing tools.
pub use web::{SearchHit, SearchProvider, WeatherProvider, WeatherReport};
