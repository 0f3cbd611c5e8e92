//! Network provider interfaces backing the web-facing tools.

use async_trait::async_trait;
use colloquy_protocol::ToolError;
use serde::{Deserialize, Serialize};

/// Search result returned by a search provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    /// Result title.
    pub title: String,
    /// Result URL.
    pub url: String,
    /// Result snippet.
    pub snippet: String,
}

/// Web search interface, stubbed out in tests.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a query and return up to `limit` hits.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, ToolError>;
}

/// Current weather conditions for a location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeatherReport {
    /// Location the report describes.
    pub location: String,
    /// Human-readable conditions summary.
    pub description: String,
    /// Temperature in degrees Celsius.
    pub temperature_c: f64,
    /// Relative humidity percentage, when reported.
    pub humidity_pct: Option<f64>,
    /// Wind speed in km/h, when reported.
    pub wind_kph: Option<f64>,
}

/// Weather lookup interface, stubbed out in tests.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch current conditions for a free-form location string.
    async fn current(&self, location: &str) -> Result<WeatherReport, ToolError>;
}
