//! Conversation history storage.

use crate::error::CoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use colloquy_protocol::{ChatTurn, Role};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Identifier of one conversation thread.
pub type ThreadId = Uuid;

/// One persisted message in a thread.
///
/// Only plain text messages are stored; intermediate tool-call and
/// tool-result turns belong to a single turn's exchange and are never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredMessage {
    /// Role that produced the message.
    pub role: Role,
    /// Message text.
    pub content: String,
    /// Persistence timestamp.
    pub created_at: DateTime<Utc>,
}

impl StoredMessage {
    /// Create a message stamped with the current time.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    /// Convert into a plain context turn.
    pub fn to_turn(&self) -> ChatTurn {
        match self.role {
            Role::System => ChatTurn::system(&self.content),
            Role::User => ChatTurn::user(&self.content),
            Role::Assistant | Role::Tool => ChatTurn::assistant(&self.content),
        }
    }
}

/// Backing store for conversation threads.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Read all messages of a thread, oldest first. Unknown threads are empty.
    async fn read(&self, thread: ThreadId) -> Result<Vec<StoredMessage>, CoreError>;

    /// Append one message to a thread, creating the thread if needed.
    async fn append(&self, thread: ThreadId, message: StoredMessage) -> Result<(), CoreError>;
}

/// In-memory history store for tests and single-process deployments.
#[derive(Debug, Default)]
pub struct MemoryHistoryStore {
    threads: RwLock<HashMap<ThreadId, Vec<StoredMessage>>>,
}

impl MemoryHistoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages currently held for a thread.
    pub fn len(&self, thread: ThreadId) -> usize {
        self.threads
            .read()
            .get(&thread)
            .map(Vec::len)
            .unwrap_or_default()
    }

    /// Whether a thread has no messages.
    pub fn is_empty(&self, thread: ThreadId) -> bool {
        self.len(thread) == 0
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn read(&self, thread: ThreadId) -> Result<Vec<StoredMessage>, CoreError> {
        Ok(self
            .threads
            .read()
            .get(&thread)
            .cloned()
            .unwrap_or_default())
    }

    async fn append(&self, thread: ThreadId, message: StoredMessage) -> Result<(), CoreError> {
        self.threads.write().entry(thread).or_default().push(message);
        Ok(())
    }
}
