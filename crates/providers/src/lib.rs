//! Language-model client implementations for AuthProof.
//!
//! All providers implement the `authproof_core::Provider` trait.

pub mod openai_compat;

pub use openai_compat::OpenAiCompatProvider;
