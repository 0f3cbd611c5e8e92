//! Registry for tool implementations with alias indirection.

use crate::tool::{CatalogEntry, Tool};
use colloquy_protocol::ToolError;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory registry mapping identifiers to tool capabilities.
///
/// Built once at process start via explicit registration and read-only
/// thereafter; share it behind an `Arc` once populated. Identifiers exposed
/// to the provider may be aliases of internal tool names (`web_search` ->
/// `WebSearch`), so resolution always walks the alias map first.
#[derive(Default)]
pub struct ToolRegistry {
    /// Map of internal tool name to implementation.
    tools: HashMap<String, Arc<dyn Tool>>,
    /// Registration order of internal names.
    order: Vec<String>,
    /// Map of external alias to internal tool name.
    aliases: HashMap<String, String>,
}

impl ToolRegistry {
    /// Create an empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its internal name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<(), ToolError> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) || self.aliases.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }
        debug!("registering tool (name={})", name);
        self.order.push(name.clone());
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Register an external alias for an already-registered tool.
    pub fn register_alias(
        &mut self,
        alias: impl Into<String>,
        target: &str,
    ) -> Result<(), ToolError> {
        let alias = alias.into();
        if !self.tools.contains_key(target) {
            return Err(ToolError::UnknownTool(target.to_string()));
        }
        if self.tools.contains_key(&alias) || self.aliases.contains_key(&alias) {
            return Err(ToolError::DuplicateTool(alias));
        }
        debug!("registering tool alias (alias={}, target={})", alias, target);
        self.aliases.insert(alias, target.to_string());
        Ok(())
    }

    /// Resolve an identifier, following alias indirection.
    pub fn resolve(&self, identifier: &str) -> Result<Arc<dyn Tool>, ToolError> {
        let name = self
            .aliases
            .get(identifier)
            .map(String::as_str)
            .unwrap_or(identifier);
        self.tools
            .get(name)
            .cloned()
            .ok_or_else(|| ToolError::UnknownTool(identifier.to_string()))
    }

    /// Whether an identifier (name or alias) resolves to a tool.
    pub fn contains(&self, identifier: &str) -> bool {
        self.resolve(identifier).is_ok()
    }

    /// All registered tools in registration order.
    pub fn list(&self) -> Vec<Arc<dyn Tool>> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name).cloned())
            .collect()
    }

    /// Internal tool names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Discovery catalog of all registered tools.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        self.list()
            .into_iter()
            .map(|tool| CatalogEntry {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.schema().properties(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::ToolRegistry;
    use crate::schema::ToolSchema;
    use crate::tool::Tool;
    use async_trait::async_trait;
    use colloquy_protocol::ToolError;
    use pretty_assertions::assert_eq;
    use serde_json::{Map, Value, json};
    use std::sync::Arc;

    #[derive(Debug)]
    struct DummyTool {
        name: &'static str,
    }

    #[async_trait]
    impl Tool for DummyTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "dummy"
        }

        fn schema(&self) -> ToolSchema {
            ToolSchema::new()
        }

        async fn invoke(&self, _args: &Map<String, Value>) -> Result<Value, ToolError> {
            Ok(json!({}))
        }
    }

    #[test]
    fn registry_resolves_names_and_aliases() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(DummyTool { name: "WebSearch" }))
            .expect("register");
        registry
            .register_alias("web_search", "WebSearch")
            .expect("alias");

        assert_eq!(registry.resolve("WebSearch").expect("name").name(), "WebSearch");
        assert_eq!(registry.resolve("web_search").expect("alias").name(), "WebSearch");
        assert_eq!(registry.contains("missing"), false);
    }

    #[test]
    fn registry_rejects_duplicates() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(DummyTool { name: "Calculator" }))
            .expect("register");

        let err = registry
            .register(Arc::new(DummyTool { name: "Calculator" }))
            .expect_err("duplicate name");
        assert!(matches!(err, ToolError::DuplicateTool(_)));

        registry
            .register_alias("calculator", "Calculator")
            .expect("alias");
        let err = registry
            .register_alias("calculator", "Calculator")
            .expect_err("duplicate alias");
        assert!(matches!(err, ToolError::DuplicateTool(_)));
    }

    #[test]
    fn alias_requires_existing_target() {
        let mut registry = ToolRegistry::new();
        let err = registry
            .register_alias("weather", "Weather")
            .expect_err("missing target");
        assert!(matches!(err, ToolError::UnknownTool(_)));
    }

    #[test]
    fn unknown_identifier_names_the_lookup() {
        let registry = ToolRegistry::new();
        let err = registry.resolve("nope").expect_err("unknown");
        assert_eq!(err.to_string(), "unknown tool: nope");
    }

    #[test]
    fn list_preserves_registration_order() {
        let mut registry = ToolRegistry::new();
        registry
            .register(Arc::new(DummyTool { name: "Zeta" }))
            .expect("register");
        registry
            .register(Arc::new(DummyTool { name: "Alpha" }))
            .expect("register");

        assert_eq!(registry.names(), vec!["Zeta", "Alpha"]);
        let catalog = registry.catalog();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "Zeta");
    }
}
