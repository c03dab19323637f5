//! LLM provider abstraction for linux-buddy.
//!
//! - `LlmProvider`: trait for concrete chat-completion backends
//! - `text_fragments`: narrows a provider event stream to response text

pub mod provider;

pub use provider::{text_fragments, EventStream, LlmProvider};
