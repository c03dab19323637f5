//! Core logic for linux-buddy.
//!
//! Holds the streaming response renderer (styled writer, thinking spinner,
//! think-segment filter), the `LlmProvider` port that the infrastructure
//! layer implements, and the chat prompt builder. Depends only on
//! `buddy-types` -- never on `buddy-infra` or any network crate.

pub mod llm;
pub mod prompt;
pub mod render;
