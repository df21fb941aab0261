//! In-memory store — useful for testing and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use authproof_core::error::StoreError;
use authproof_core::message::{Conversation, ConversationId};
use authproof_core::store::{ConversationStore, ConversationSummary};
use tokio::sync::RwLock;

/// Stores conversations in a map. Nothing survives process exit.
pub struct InMemoryStore {
    conversations: Arc<RwLock<HashMap<String, Conversation>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            conversations: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn save(&self, conversation: &Conversation) -> Result<(), StoreError> {
        self.conversations
            .write()
            .await
            .insert(conversation.id.to_string(), conversation.clone());
        Ok(())
    }

    async fn load(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError> {
        Ok(self.conversations.read().await.get(&id.to_string()).cloned())
    }

    async fn list(&self) -> Result<Vec<ConversationSummary>, StoreError> {
        let conversations = self.conversations.read().await;
        let mut summaries: Vec<ConversationSummary> = conversations
            .values()
            .map(|c| ConversationSummary {
                id: c.id.clone(),
                title: c.title.clone(),
                message_count: c.messages.len(),
                updated_at: c.updated_at,
            })
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    async fn delete(&self, id: &ConversationId) -> Result<bool, StoreError> {
        Ok(self
            .conversations
            .write()
            .await
            .remove(&id.to_string())
            .is_some())
    }
}
