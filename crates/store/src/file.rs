//! File-backed store — persistent JSON-lines storage.
//!
//! Each line of the file is one JSON-encoded `Conversation`. Conversations
//! are loaded into memory on creation and the whole file is rewritten on
//! every mutation. Simple, portable, human-inspectable, and free of external
//! services.
//!
//! Default location: `~/.authproof/conversations.jsonl`

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use authproof_core::error::StoreError;
use authproof_core::message::{Conversation, ConversationId};
use authproof_core::store::{ConversationStore, ConversationSummary};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// A JSONL-file store, one conversation per line.
pub struct FileStore {
    path: PathBuf,
    conversations: Arc<RwLock<HashMap<String, Conversation>>>,
}

impl FileStore {
    /// Open a store at the given path.
    ///
    /// If the file exists, conversations are loaded from it; corrupted lines
    /// are skipped with a warning. If it does not exist, the store starts
    /// empty and the file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let conversations = Self::load_from_disk(&path);
        debug!(
            path = %path.display(),
            count = conversations.len(),
            "File store loaded"
        );
        Self {
            path,
            conversations: Arc::new(RwLock::new(conversations)),
        }
    }

    /// Default path: `~/.authproof/conversations.jsonl`
    pub fn default_path() -> PathBuf {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home)
            .join(".authproof")
            .join("conversations.jsonl")
    }

    fn load_from_disk(path: &Path) -> HashMap<String, Conversation> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return HashMap::new(), // File doesn't exist yet — start empty
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<Conversation>(line) {
                Ok(conversation) => Some((conversation.id.to_string(), conversation)),
                Err(e) => {
                    warn!(error = %e, "Skipping corrupted conversation record");
                    None
                }
            })
            .collect()
    }

    /// Rewrite the whole file from the in-memory map.
    async fn flush(&self) -> Result<(), StoreError> {
        let conversations = self.conversations.read().await;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Storage(format!("Failed to create store directory: {e}"))
            })?;
        }

        let mut content = String::new();
        for conversation in conversations.values() {
            let line = serde_json::to_string(conversation).map_err(|e| {
                StoreError::Storage(format!("Failed to serialize conversation: {e}"))
            })?;
            content.push_str(&line);
            content.push('\n');
        }

        std::fs::write(&self.path, &content)
            .map_err(|e| StoreError::Storage(format!("Failed to write store file: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl ConversationStore for FileStore {
    fn name(&self) -> &str {
        "file"
    }

    async fn save(&self, conversation: &Conversation) -> Result<(), StoreError> {
        self.conversations
            .write()
            .await
            .insert(conversation.id.to_string(), conversation.clone());
        self.flush().await
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
        let removed = self
            .conversations
            .write()
            .await
            .remove(&id.to_string())
            .is_some();
        if removed {
            self.flush().await?;
        }
        Ok(removed)
    }
}
