//! Prompt-shaping types: what kind of answer is wanted, and the system
//! prompt payload sent ahead of the conversation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The shape of answer a verb asks the backend for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseKind {
    /// Bash command(s) only, no explanation.
    Bash,
    /// Free-form prose.
    Text,
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseKind::Bash => write!(f, "Bash"),
            ResponseKind::Text => write!(f, "Text"),
        }
    }
}

/// System prompt describing the user and their environment.
///
/// Serialized as JSON with PascalCase keys and sent as the system message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SystemPrompt {
    pub username: String,
    pub current_date_time: String,
    pub current_working_directory: String,
    pub instructions: String,
    pub allowed_response_type: ResponseKind,
}
