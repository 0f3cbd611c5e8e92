//! Agent profiles consumed by the orchestrator.

use serde::{Deserialize, Serialize};

/// Declarative description of one agent.
///
/// Profiles are plain data; the orchestrator reads them but never mutates
/// them. The `tools` list carries externally-advertised identifiers, which
/// may be registry aliases rather than internal tool names.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgentProfile {
    /// Stable agent identifier, used in logs.
    pub id: String,
    /// System instructions prepended to every context.
    pub instructions: String,
    /// Model override; falls back to the configured default when absent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub model: Option<String>,
    /// Tool identifiers this agent may call.
    #[serde(default)]
    pub tools: Vec<String>,
}

impl AgentProfile {
    /// Create a profile with no model override and no tools.
    pub fn new(id: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            instructions: instructions.into(),
            model: None,
            tools: Vec::new(),
        }
    }

    /// Set a per-agent model override.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Grant the agent a tool by identifier.
    pub fn with_tool(mut self, identifier: impl Into<String>) -> Self {
        self.tools.push(identifier.into());
        self
    }

    /// Replace the full tool list.
    pub fn with_tools(mut self, tools: Vec<String>) -> Self {
        self.tools = tools;
        self
    }

    /// The model this agent should use given a configured default.
    ///
    /// Blank overrides are ignored, matching the fallback behavior of the
    /// provider config.
    pub fn effective_model<'a>(&'a self, default_model: &'a str) -> &'a str {
        match self.model.as_deref() {
            Some(model) if !model.trim().is_empty() => model,
            _ => default_model,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AgentProfile;
    use pretty_assertions::assert_eq;

    #[test]
    fn effective_model_prefers_override() {
        let agent = AgentProfile::new("helper", "Be helpful.").with_model("gpt-4o");
        assert_eq!(agent.effective_model("gpt-4o-mini"), "gpt-4o");
    }

    #[test]
    fn blank_override_falls_back_to_default() {
        let agent = AgentProfile::new("helper", "Be helpful.").with_model("  ");
        assert_eq!(agent.effective_model("gpt-4o-mini"), "gpt-4o-mini");
    }

    #[test]
    fn tools_accumulate_in_order() {
        let agent = AgentProfile::new("helper", "Be helpful.")
            .with_tool("calculator")
            .with_tool("web_search");
        assert_eq!(agent.tools, vec!["calculator", "web_search"]);
    }
}
