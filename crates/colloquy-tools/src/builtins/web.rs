//! Built-in tools for web search and weather lookups.

use crate::schema::{ParamField, ParamType, ToolSchema};
use crate::tool::Tool;
use crate::web::{SearchProvider, WeatherProvider};
use async_trait::async_trait;
use colloquy_protocol::ToolError;
use log::debug;
use serde_json::{Map, Value, json};
use std::fmt;
use std::sync::Arc;

/// Default search result limit.
const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Tool that searches the web through a pluggable provider.
pub struct WebSearchTool {
    provider: Arc<dyn SearchProvider>,
}

impl WebSearchTool {
    /// Create a search tool over the given provider.
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self { provider }
    }
}

impl fmt::Debug for WebSearchTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebSearchTool").finish()
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "WebSearch"
    }

    fn description(&self) -> &str {
        "Search the web for current information and data"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new()
            .field(ParamField::new("query", ParamType::String, "Search query to execute").required())
            .field(ParamField::new(
                "limit",
                ParamType::Integer,
                "Maximum number of results to return",
            ))
    }

    async fn invoke(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let query = args["query"].as_str().unwrap_or_default();
        if query.trim().is_empty() {
            return Err(ToolError::InvalidArguments("query cannot be empty".to_string()));
        }
        let limit = args
            .get("limit")
            .and_then(Value::as_u64)
            .map(|limit| limit as usize)
            .unwrap_or(DEFAULT_SEARCH_LIMIT);
        debug!("web search (query_len={}, limit={})", query.len(), limit);
        let results = self.provider.search(query, limit).await?;
        Ok(json!({ "query": query, "results": results }))
    }
}

/// Tool that reports current weather through a pluggable provider.
pub struct WeatherTool {
    provider: Arc<dyn WeatherProvider>,
}

impl WeatherTool {
    /// Create a weather tool over the given provider.
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

impl fmt::Debug for WeatherTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherTool").finish()
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "Weather"
    }

    fn description(&self) -> &str {
        "Get current weather information for any location"
    }

    fn schema(&self) -> ToolSchema {
        ToolSchema::new().field(
            ParamField::new("location", ParamType::String, "City or place name").required(),
        )
    }

    async fn invoke(&self, args: &Map<String, Value>) -> Result<Value, ToolError> {
        let location = args["location"].as_str().unwrap_or_default();
        if location.trim().is_empty() {
            return Err(ToolError::InvalidArguments(
                "location cannot be empty".to_string(),
            ));
        }
        debug!("weather lookup (location_len={})", location.len());
        let report = self.provider.current(location).await?;
        serde_json::to_value(&report)
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))
    }
}
