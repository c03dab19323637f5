//! Infrastructure layer for linux-buddy.
//!
//! Contains the implementation of the `LlmProvider` port defined in
//! `buddy-core` (an OpenAI-compatible streaming client, Ollama by default)
//! and the on-disk settings store.

pub mod llm;
pub mod settings;
