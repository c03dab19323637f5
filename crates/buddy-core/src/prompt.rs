//! Chat request builder.
//!
//! Turns a question (and optional piped context) into a streaming
//! [`CompletionRequest`]. The system message is a JSON [`SystemPrompt`]
//! describing who is asking and from where, so the model can tailor commands
//! to the user's environment.
//!
//! Conversation layout:
//! ```text
//! system:    {"Username": ..., "Instructions": ..., "AllowedResponseType": ...}
//! user:      <piped context>            (only with context)
//! assistant: "Thank you for the additional context. ..."   (only with context)
//! user:      <question>
//! ```

use buddy_types::llm::{CompletionRequest, LlmError, Message};
use buddy_types::prompt::{ResponseKind, SystemPrompt};

pub const BASH_INSTRUCTIONS: &str = "You are an expert on Linux systems and bash commands. Help the user write a bash command. Only output bash command or commands. Do not explain yourself.";

pub const TEXT_INSTRUCTIONS: &str = "You are a helpful assistant.";

const BASH_CONTEXT_ACK: &str =
    "Thank you for the additional context. What bash command can I provide for you?";

const TEXT_CONTEXT_ACK: &str = "Thank you for the additional context. What would you like to know about the data you provided?";

/// Who is asking and from where.
#[derive(Debug, Clone)]
pub struct PromptEnvironment {
    pub username: String,
    pub current_date_time: String,
    pub current_working_directory: String,
}

impl PromptEnvironment {
    /// Capture the current user, local time, and working directory.
    pub fn detect() -> Self {
        let username = std::env::var("USER")
            .or_else(|_| std::env::var("USERNAME"))
            .unwrap_or_default();
        let current_working_directory = std::env::current_dir()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();

        Self {
            username,
            current_date_time: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            current_working_directory,
        }
    }
}

/// System instructions for a response kind.
pub fn instructions(kind: ResponseKind) -> &'static str {
    match kind {
        ResponseKind::Bash => BASH_INSTRUCTIONS,
        ResponseKind::Text => TEXT_INSTRUCTIONS,
    }
}

/// Build the streaming request for one question.
///
/// Bash answers are sampled deterministically (temperature 0, top-p 0.5);
/// text answers keep the backend defaults.
pub fn build_request(
    kind: ResponseKind,
    question: &str,
    context: Option<&str>,
    model: &str,
    environment: &PromptEnvironment,
) -> Result<CompletionRequest, LlmError> {
    let system_prompt = SystemPrompt {
        username: environment.username.clone(),
        current_date_time: environment.current_date_time.clone(),
        current_working_directory: environment.current_working_directory.clone(),
        instructions: instructions(kind).to_string(),
        allowed_response_type: kind,
    };
    let system = serde_json::to_string(&system_prompt)
        .map_err(|e| LlmError::InvalidRequest(format!("system prompt: {e}")))?;

    let mut messages = Vec::with_capacity(3);
    if let Some(context) = context.filter(|c| !c.is_empty()) {
        messages.push(Message::user(context));
        messages.push(Message::assistant(match kind {
            ResponseKind::Bash => BASH_CONTEXT_ACK,
            ResponseKind::Text => TEXT_CONTEXT_ACK,
        }));
    }
    messages.push(Message::user(question));

    let (temperature, top_p) = match kind {
        ResponseKind::Bash => (Some(0.0), Some(0.5)),
        ResponseKind::Text => (None, None),
    };

    Ok(CompletionRequest {
        model: model.to_string(),
        messages,
        system: Some(system),
        max_tokens: None,
        temperature,
        top_p,
        stream: true,
    })
}
