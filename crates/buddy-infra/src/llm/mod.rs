//! LLM provider implementations.
//!
//! Contains the concrete implementation of the [`LlmProvider`] port defined
//! in `buddy-core`, plus a factory ([`create_provider`]) that builds it from
//! the effective endpoint/model settings.
//!
//! [`LlmProvider`]: buddy_core::llm::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;

use buddy_core::llm::LlmProvider;
use buddy_types::config::Settings;

use self::openai_compat::OpenAiCompatibleProvider;

/// Build the backend client for the given settings.
///
/// `api_key` is only needed for servers that enforce authentication; Ollama
/// accepts the placeholder key.
pub fn create_provider(settings: &Settings, api_key: Option<SecretString>) -> Box<dyn LlmProvider> {
    let config = openai_compat::config::ollama_defaults(&settings.endpoint, &settings.model, api_key);
    tracing::debug!(base_url = %config.base_url, "configured chat backend");
    Box::new(OpenAiCompatibleProvider::new(config))
}
