//! Shared test doubles for colloquy crates. Not published.

pub mod provider;
pub mod tools;

pub use provider::{
    FailingProvider, ScriptedProvider, empty_response, text_response, tool_call_response,
};
pub use tools::{BrokenTool, StubTool};
