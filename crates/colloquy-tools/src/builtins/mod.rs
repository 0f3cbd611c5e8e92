//! Built-in tools bundled with colloquy.

mod calculator;
mod pdf;
mod web;

use crate::ToolRegistry;
use crate::web::{SearchProvider, WeatherProvider};
use colloquy_protocol::ToolError;
use log::info;
use std::sync::Arc;

pub use calculator::{CalculatorTool, evaluate};
pub use pdf::ReadPdfTool;
pub use web::{WeatherTool, WebSearchTool};

/// Provider-facing aliases for the built-in tools.
///
/// Agent profiles historically declare the lowercase identifiers; the
/// registry maps them onto the internal tool names.
pub const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("calculator", "Calculator"),
    ("web_search", "WebSearch"),
    ("weather", "Weather"),
    ("read_pdf", "ReadPDF"),
];

/// Register all built-in tools and their aliases with the provided registry.
pub fn register_builtin_tools(
    registry: &mut ToolRegistry,
    search: Arc<dyn SearchProvider>,
    weather: Arc<dyn WeatherProvider>,
) -> Result<(), ToolError> {
    registry.register(Arc::new(CalculatorTool))?;
    registry.register(Arc::new(WebSearchTool::new(search)))?;
    registry.register(Arc::new(WeatherTool::new(weather)))?;
    registry.register(Arc::new(ReadPdfTool))?;
    for (alias, target) in BUILTIN_ALIASES {
        registry.register_alias(*alias, target)?;
    }
    info!("registered built-in tools");
    Ok(())
}

/// Build a registry pre-populated with built-in tools.
pub fn builtin_tool_registry(
    search: Arc<dyn SearchProvider>,
    weather: Arc<dyn WeatherProvider>,
) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    register_builtin_tools(&mut registry, search, weather)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::builtin_tool_registry;
    use crate::web::{SearchHit, SearchProvider, WeatherProvider, WeatherReport};
    use async_trait::async_trait;
    use colloquy_protocol::ToolError;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    struct NullSearch;

    #[async_trait]
    impl SearchProvider for NullSearch {
        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchHit>, ToolError> {
            Ok(Vec::new())
        }
    }

    struct NullWeather;

    #[async_trait]
    impl WeatherProvider for NullWeather {
        async fn current(&self, location: &str) -> Result<WeatherReport, ToolError> {
            Ok(WeatherReport {
                location: location.to_string(),
                description: String::new(),
                temperature_c: 0.0,
                humidity_pct: None,
                wind_kph: None,
            })
        }
    }

    #[test]
    fn builtins_resolve_by_name_and_alias() {
        let registry = builtin_tool_registry(Arc::new(NullSearch), Arc::new(NullWeather))
            .expect("registry");
        assert_eq!(
            registry.names(),
            vec!["Calculator", "WebSearch", "Weather", "ReadPDF"]
        );
        for (alias, target) in super::BUILTIN_ALIASES {
            assert_eq!(registry.resolve(alias).expect("alias").name(), *target);
        }
    }
}
