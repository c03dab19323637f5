//! Shared domain types for linux-buddy.
//!
//! Chat messages, completion requests, stream events, settings, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod llm;
pub mod prompt;
