//! Connection settings for OpenAI-compatible backends.

use secrecy::SecretString;

/// Ollama accepts any bearer token; this one is sent when none is configured.
pub const OLLAMA_PLACEHOLDER_KEY: &str = "ollama";

/// Configuration for an OpenAI-compatible chat-completion backend.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "ollama").
    pub provider_name: String,
    /// Base URL for the API, including the `/v1` suffix.
    pub base_url: String,
    /// API key for authentication.
    pub api_key: SecretString,
    /// Model used when a request leaves the model empty.
    pub model: String,
}

/// Ollama configuration for a server root such as `http://localhost:11434`.
///
/// Ollama serves the OpenAI protocol under `/v1`.
pub fn ollama_defaults(endpoint: &str, model: &str, api_key: Option<SecretString>) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "ollama".into(),
        base_url: api_base(endpoint),
        api_key: api_key.unwrap_or_else(|| SecretString::from(OLLAMA_PLACEHOLDER_KEY)),
        model: model.into(),
    }
}

/// `{endpoint}/v1`, unless the endpoint already ends in `/v1`.
pub fn api_base(endpoint: &str) -> String {
    let root = endpoint.trim().trim_end_matches('/');
    if root.ends_with("/v1") {
        root.to_string()
    } else {
        format!("{root}/v1")
    }
}
