//! # AuthProof Core
//!
//! Domain types, traits, and error definitions for the AuthProof
//! device-authorization test agent. This crate has **zero framework
//! dependencies** — it defines the domain model that all other crates
//! implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with scripted/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod agent;
pub mod error;
pub mod message;
pub mod provider;
pub mod store;
pub mod tool;

// Re-export key types at crate root for ergonomics
pub use agent::AgentConfig;
pub use error::{Error, ProviderError, Result, StoreError, ToolError};
pub use message::{Conversation, ConversationId, Message, MessageToolCall, Role};
pub use provider::{ChatRequest, ChatResponse, Provider, Usage};
pub use store::{ConversationStore, ConversationSummary};
pub use tool::{
    ParamKind, ParamSpec, Tool, ToolInvocation, ToolRegistry, ToolResult, ToolSpec,
};
