//! LlmProvider trait definition.
//!
//! This is the port the backend client implements. The renderer never sees a
//! provider directly: it consumes the fragment sequence produced by
//! [`text_fragments`].

use std::pin::Pin;

use futures_util::{Stream, StreamExt};
use tracing::debug;

use buddy_types::llm::{CompletionRequest, LlmError, StreamEvent};

/// Boxed stream of provider events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send + 'static>>;

/// Trait for chat-completion backends (Ollama, OpenAI-compatible servers, ...).
///
/// Object-safe so the CLI can hold a `Box<dyn LlmProvider>` chosen at runtime.
/// Implementations live in buddy-infra.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Send a streaming completion request. Returns a stream of events.
    ///
    /// Transport failures, including failing to connect at all, surface as
    /// an `Err` item on the stream rather than from this call.
    fn stream(&self, request: CompletionRequest) -> EventStream;
}

/// Narrow a provider event stream to the response text fragments.
///
/// Yields each non-empty `TextDelta` in order and ends at `Done` or when the
/// underlying stream ends. Errors pass through unchanged and end the sequence.
pub fn text_fragments<S>(events: S) -> impl Stream<Item = Result<String, LlmError>>
where
    S: Stream<Item = Result<StreamEvent, LlmError>>,
{
    async_stream::try_stream! {
        futures_util::pin_mut!(events);

        while let Some(event) = events.next().await {
            match event? {
                StreamEvent::TextDelta { text } => {
                    if !text.is_empty() {
                        yield text;
                    }
                }
                StreamEvent::Usage(usage) => {
                    debug!(
                        input_tokens = usage.input_tokens,
                        output_tokens = usage.output_tokens,
                        "token usage"
                    );
                }
                StreamEvent::MessageDelta { stop_reason } => {
                    debug!(%stop_reason, "backend finished message");
                }
                StreamEvent::Done => break,
                StreamEvent::Connected => {}
            }
        }
    }
}
