//! Persistent settings for linux-buddy.
//!
//! `Settings` is the `config.toml` stored under the platform config directory.
//! Every field has a default so partial or empty files load cleanly.

use serde::{Deserialize, Serialize};

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "deepseek-r1:1.5b";

/// Ollama's default listen address.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// User settings: which model to ask and where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the backend, without the `/v1` suffix.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: default_endpoint(),
        }
    }
}

/// Normalize a model name typed on the command line.
///
/// Shells sometimes leave quotes in place (`buddy model '"llama3"'`), so
/// surrounding whitespace and double quotes are stripped.
pub fn normalize_model_name(raw: &str) -> String {
    raw.trim().trim_matches('"').to_string()
}

/// Normalize an endpoint URL: trimmed, without trailing slashes.
pub fn normalize_endpoint(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}
