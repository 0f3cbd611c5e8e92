//! Core turn orchestration for colloquy.

pub mod agent;
pub mod error;
pub mod history;
pub mod orchestrator;

/// Agent profile consumed by the orchestrator.
pub use agent::AgentProfile;
/// Errors that abort a turn.
pub use error::CoreError;
/// History storage trait and in-memory implementation.
pub use history::{HistoryStore, MemoryHistoryStore, StoredMessage, ThreadId};
/// The turn orchestrator.
pub use orchestrator::Orchestrator;
