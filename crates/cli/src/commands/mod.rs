//! CLI command implementations.

pub mod chat;
pub mod history;
pub mod tools;
