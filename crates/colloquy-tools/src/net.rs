//! HTTP-backed implementations of the network provider traits.

use crate::web::{SearchHit, SearchProvider, WeatherProvider, WeatherReport};
use async_trait::async_trait;
use colloquy_protocol::ToolError;
use log::debug;
use serde_json::Value;
use std::time::Duration;

/// Timeout for outbound tool traffic.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

fn build_client() -> Result<reqwest::Client, ToolError> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|err| ToolError::ExecutionFailed(err.to_string()))
}

/// Search provider backed by the DuckDuckGo instant-answer API.
///
/// Keyless endpoint; answers are shallow but sufficient for grounding a
/// model response.
pub struct DuckDuckGoSearch {
    client: reqwest::Client,
}

impl DuckDuckGoSearch {
    /// Create a provider with a bounded HTTP client.
    pub fn new() -> Result<Self, ToolError> {
        Ok(Self {
            client: build_client()?,
        })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, ToolError> {
        let response = self
            .client
            .get("https://api.duckduckgo.com/")
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;
        if !response.status().is_success() {
            return Err(ToolError::ExecutionFailed(format!(
                "search request failed (status={})",
                response.status().as_u16()
            )));
        }
        let body: Value = response
            .json()
            .await
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;

        let mut hits = Vec::new();
        let abstract_text = body["AbstractText"].as_str().unwrap_or_default();
        if !abstract_text.is_empty() {
            hits.push(SearchHit {
                title: body["Heading"].as_str().unwrap_or(query).to_string(),
                url: body["AbstractURL"].as_str().unwrap_or_default().to_string(),
                snippet: abstract_text.to_string(),
            });
        }
        if let Some(topics) = body["RelatedTopics"].as_array() {
            for topic in topics {
                let Some(text) = topic["Text"].as_str() else {
                    continue;
                };
                hits.push(SearchHit {
                    title: text.chars().take(80).collect(),
                    url: topic["FirstURL"].as_str().unwrap_or_default().to_string(),
                    snippet: text.to_string(),
                });
            }
        }
        hits.truncate(limit);
        debug!("search completed (hits={})", hits.len());
        Ok(hits)
    }
}

/// Weather provider backed by the keyless wttr.in JSON endpoint.
pub struct WttrWeather {
    client: reqwest::Client,
}

impl WttrWeather {
    /// Create a provider with a bounded HTTP client.
    pub fn new() -> Result<Self, ToolError> {
        Ok(Self {
            client: build_client()?,
        })
    }
}

#[async_trait]
impl WeatherProvider for WttrWeather {
    async fn current(&self, location: &str) -> Result<WeatherReport, ToolError> {
        let url = format!("https://wttr.in/{location}");
        let response = self
            .client
            .get(url)
            .query(&[("format", "j1")])
            .send()
            .await
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;
        if !response.status().is_success() {
            return Err(ToolError::ExecutionFailed(format!(
                "weather request failed (status={})",
                response.status().as_u16()
            )));
        }
        let body: Value = response
            .json()
            .await
            .map_err(|err| ToolError::ExecutionFailed(err.to_string()))?;

        let current = body["current_condition"]
            .get(0)
            .ok_or_else(|| ToolError::ExecutionFailed("no current conditions reported".to_string()))?;
        let temperature_c = current["temp_C"]
            .as_str()
            .and_then(|temp| temp.parse::<f64>().ok())
            .ok_or_else(|| ToolError::ExecutionFailed("malformed temperature".to_string()))?;

        Ok(WeatherReport {
            location: location.to_string(),
            description: current["weatherDesc"]
                .get(0)
                .and_then(|desc| desc["value"].as_str())
                .unwrap_or_default()
                .to_string(),
            temperature_c,
            humidity_pct: current["humidity"]
                .as_str()
                .and_then(|humidity| humidity.parse().ok()),
            wind_kph: current["windspeedKmph"]
                .as_str()
                .and_then(|wind| wind.parse().ok()),
        })
    }
}
