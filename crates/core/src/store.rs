//! ConversationStore trait — the persistence boundary.
//!
//! The agent core never touches storage: the caller persists turns based on
//! the events it receives. This trait specifies that collaborator's
//! interface; backends live in `authproof-store`.

use crate::error::StoreError;
use crate::message::{Conversation, ConversationId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A lightweight listing entry for stored conversations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: ConversationId,
    pub title: Option<String>,
    pub message_count: usize,
    pub updated_at: DateTime<Utc>,
}

/// Durable persistence of conversations.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// A human-readable backend name (e.g., "in_memory", "file").
    fn name(&self) -> &str;

    /// Persist the conversation, replacing any prior version.
    async fn save(&self, conversation: &Conversation) -> Result<(), StoreError>;

    /// Load a conversation by id.
    async fn load(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError>;

    /// List stored conversations, most recently updated first.
    async fn list(&self) -> Result<Vec<ConversationSummary>, StoreError>;

    /// Delete a conversation. Returns whether it existed.
    async fn delete(&self, id: &ConversationId) -> Result<bool, StoreError>;
}
