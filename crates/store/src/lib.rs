//! Conversation persistence backends.
//!
//! Two implementations of [`ConversationStore`]:
//! - [`InMemoryStore`] for tests and ephemeral sessions
//! - [`FileStore`] for durable JSONL storage on disk
//!
//! Neither is visible to the agent loop; callers persist conversations after
//! a run based on the events they received.
//!
//! [`ConversationStore`]: authproof_core::store::ConversationStore

pub mod file;
pub mod in_memory;

pub use file::FileStore;
pub use in_memory::InMemoryStore;
