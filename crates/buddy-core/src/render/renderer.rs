//! Streaming response renderer.
//!
//! [`render`] drains a fragment sequence to the terminal between two framing
//! lines. Verbose mode shows every fragment as-is; normal mode routes the
//! fragments through a [`ThinkFilter`] so reasoning stays hidden behind the
//! thinking indicator.
//!
//! The indicator and the render loop never draw at the same time: visible text
//! is only written while the filter is outside a think-segment, and the
//! indicator's `stop` resolves only after its last write.

use std::io;

use futures_util::{Stream, StreamExt};
use tracing::{debug, warn};

use buddy_types::llm::LlmError;

use super::spinner::ThinkingIndicator;
use super::think::ThinkFilter;
use super::writer::StyledWriter;

/// Framing line written before the response.
pub const RESPONSE_HEADER: &str = "---------------------Response-------------------------";

/// Framing line written after the response.
pub const RESPONSE_FOOTER: &str = "------------------------------------------------------";

/// Why a render ended early.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The fragment source failed mid-stream.
    #[error("backend error: {0}")]
    Source(#[from] LlmError),

    /// Writing to the terminal failed.
    #[error("terminal write failed: {0}")]
    Sink(#[from] io::Error),
}

/// Render one response.
///
/// In normal mode the indicator is stopped before this returns on every path,
/// including source and sink failures. After a source failure the closing
/// frame is still written so the prompt lands on a clean line; text already on
/// screen stays there.
pub async fn render<S, I>(
    fragments: S,
    writer: &StyledWriter,
    indicator: &mut I,
    verbose: bool,
) -> Result<(), RenderError>
where
    S: Stream<Item = Result<String, LlmError>>,
    I: ThinkingIndicator,
{
    writer.write_line(RESPONSE_HEADER)?;

    futures_util::pin_mut!(fragments);

    let outcome = if verbose {
        pump_raw(fragments, writer).await
    } else {
        let outcome = pump_filtered(fragments, writer, indicator).await;
        indicator.stop().await;
        outcome
    };

    match outcome {
        Ok(()) => {
            write_footer(writer)?;
            Ok(())
        }
        Err(RenderError::Source(err)) => {
            warn!(error = %err, "response stream failed");
            if let Err(footer_err) = write_footer(writer) {
                warn!(error = %footer_err, "could not close the response frame");
            }
            Err(RenderError::Source(err))
        }
        Err(sink) => Err(sink),
    }
}

async fn pump_raw<S>(mut fragments: S, writer: &StyledWriter) -> Result<(), RenderError>
where
    S: Stream<Item = Result<String, LlmError>> + Unpin,
{
    let mut count = 0usize;
    while let Some(fragment) = fragments.next().await {
        writer.write(&fragment?)?;
        count += 1;
    }
    debug!(fragments = count, "raw response rendered");
    Ok(())
}

async fn pump_filtered<S, I>(
    mut fragments: S,
    writer: &StyledWriter,
    indicator: &mut I,
) -> Result<(), RenderError>
where
    S: Stream<Item = Result<String, LlmError>> + Unpin,
    I: ThinkingIndicator,
{
    let mut filter = ThinkFilter::new(indicator);
    let mut count = 0usize;
    while let Some(fragment) = fragments.next().await {
        let fragment = fragment?;
        if let Some(visible) = filter.feed(&fragment).await {
            writer.write(visible)?;
        }
        count += 1;
    }
    debug!(fragments = count, final_state = ?filter.state(), "filtered response rendered");
    Ok(())
}

fn write_footer(writer: &StyledWriter) -> io::Result<()> {
    writer.write_line_empty()?;
    writer.write_line(RESPONSE_FOOTER)?;
    writer.write_line_empty()
}
