//! The question verbs: `buddy bash` and `buddy general`.
//!
//! Builds the request, opens the completion stream, and hands the text
//! fragments to the renderer. Ctrl+C while a response is streaming stops the
//! spinner cleanly before exiting.

use std::future::Future;
use std::io::{self, IsTerminal, Write};

use anyhow::{bail, Context};
use futures_util::Stream;

use buddy_core::llm::text_fragments;
use buddy_core::prompt::{build_request, PromptEnvironment};
use buddy_core::render::{render, Spinner, StyledWriter, TextStyle, ThinkingIndicator};
use buddy_infra::llm::create_provider;
use buddy_types::llm::LlmError;
use buddy_types::prompt::ResponseKind;

use crate::state::AppState;

const CONTEXT_HEADER: &str = "---------------------Context--------------------------";
const QUESTION_HEADER: &str = "---------------------Question-------------------------";
const ECHO_FOOTER: &str = "------------------------------------------------------";

/// Ask one question and stream the answer to stdout.
pub async fn ask(
    state: &AppState,
    kind: ResponseKind,
    question: &str,
    context: Option<&str>,
    verbose: bool,
) -> anyhow::Result<()> {
    let request = build_request(
        kind,
        question,
        context,
        &state.settings.model,
        &PromptEnvironment::detect(),
    )?;

    if verbose {
        echo_question(&mut io::stdout().lock(), question, context)
            .context("failed to write to stdout")?;
    }

    let provider = create_provider(&state.settings, state.api_key.clone());
    tracing::info!(
        provider = provider.name(),
        model = %state.settings.model,
        endpoint = %state.settings.endpoint,
        kind = %kind,
        "asking"
    );

    let writer = StyledWriter::stdout(response_style());
    let mut indicator = Indicator::for_stdout(&writer);
    let fragments = text_fragments(provider.stream(request));

    render_until_interrupted(
        fragments,
        &writer,
        &mut indicator,
        verbose,
        tokio::signal::ctrl_c(),
    )
    .await
    .with_context(|| format!("could not get an answer from {}", state.settings.endpoint))
}

/// Render the response unless `interrupt` resolves first.
///
/// On interrupt the render future is dropped, the indicator is stopped (which
/// erases the spinner line) and the cursor moves to a fresh line.
async fn render_until_interrupted<S, I, F>(
    fragments: S,
    writer: &StyledWriter,
    indicator: &mut I,
    verbose: bool,
    interrupt: F,
) -> anyhow::Result<()>
where
    S: Stream<Item = Result<String, LlmError>>,
    I: ThinkingIndicator,
    F: Future,
{
    let outcome = {
        tokio::select! {
            result = render(fragments, writer, &mut *indicator, verbose) => Some(result),
            _ = interrupt => None,
        }
    };

    match outcome {
        Some(result) => Ok(result?),
        None => {
            tracing::debug!("response interrupted");
            indicator.stop().await;
            writer.write_line_empty().ok();
            bail!("interrupted")
        }
    }
}

/// Bold green response text when the terminal supports color.
fn response_style() -> TextStyle {
    if console::colors_enabled() {
        TextStyle::bold_green()
    } else {
        TextStyle::plain()
    }
}

/// Print the piped context and the question ahead of a verbose response.
fn echo_question<W: Write>(out: &mut W, question: &str, context: Option<&str>) -> io::Result<()> {
    if let Some(context) = context.filter(|c| !c.is_empty()) {
        writeln!(out, "{CONTEXT_HEADER}")?;
        writeln!(out, "{context}")?;
        writeln!(out, "{ECHO_FOOTER}")?;
        writeln!(out)?;
    }
    writeln!(out, "{QUESTION_HEADER}")?;
    writeln!(out, "{question}")?;
    writeln!(out, "{ECHO_FOOTER}")?;
    writeln!(out)?;
    out.flush()
}

/// Spinner on a terminal, nothing when stdout is redirected so frames never
/// end up in a file or pipe.
enum Indicator {
    Spinner(Spinner),
    Silent,
}

impl Indicator {
    fn for_stdout(writer: &StyledWriter) -> Self {
        if io::stdout().is_terminal() {
            Indicator::Spinner(Spinner::new(writer.clone()))
        } else {
            Indicator::Silent
        }
    }
}

impl ThinkingIndicator for Indicator {
    fn start(&mut self) {
        if let Indicator::Spinner(spinner) = self {
            spinner.start();
        }
    }

    async fn stop(&mut self) {
        if let Indicator::Spinner(spinner) = self {
            spinner.stop().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use buddy_core::render::spinner::SPINNER_ERASE;
    use buddy_core::render::SpinnerState;
    use futures_util::stream::{self, StreamExt};

    /// Sink keeping each write as one chunk.
    #[derive(Clone, Default)]
    struct Chunks(Arc<Mutex<Vec<String>>>);

    impl Chunks {
        fn all(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Write for Chunks {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(buf).into_owned());
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn echoed(question: &str, context: Option<&str>) -> String {
        let mut out = Vec::new();
        echo_question(&mut out, question, context).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn echo_without_context() {
        assert_eq!(
            echoed("list open ports", None),
            format!("{QUESTION_HEADER}\nlist open ports\n{ECHO_FOOTER}\n\n")
        );
    }

    #[test]
    fn echo_with_context_comes_first() {
        let out = echoed("what failed?", Some("error: disk full"));
        assert_eq!(
            out,
            format!(
                "{CONTEXT_HEADER}\nerror: disk full\n{ECHO_FOOTER}\n\n\
                 {QUESTION_HEADER}\nwhat failed?\n{ECHO_FOOTER}\n\n"
            )
        );
    }

    #[test]
    fn echo_skips_empty_context() {
        assert!(!echoed("hi", Some("")).contains(CONTEXT_HEADER));
    }

    #[test]
    fn echo_frames_are_54_columns() {
        for line in [CONTEXT_HEADER, QUESTION_HEADER, ECHO_FOOTER] {
            assert_eq!(line.len(), 54);
        }
    }

    #[tokio::test]
    async fn interrupt_while_thinking_erases_spinner() {
        let chunks = Chunks::default();
        let writer = StyledWriter::new(chunks.clone(), TextStyle::plain());
        let mut spinner = Spinner::new(writer.clone());
        // Enters a think-segment, then the backend goes quiet.
        let fragments = stream::iter(vec![Ok("<think>".to_string())]).chain(stream::pending());

        let err = render_until_interrupted(
            fragments,
            &writer,
            &mut spinner,
            false,
            tokio::time::sleep(Duration::from_millis(250)),
        )
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "interrupted");
        assert_eq!(spinner.state(), SpinnerState::Stopped);

        let written = chunks.all();
        let (newline, rest) = written.split_last().unwrap();
        assert_eq!(newline, "\n");
        assert_eq!(rest.last().unwrap(), SPINNER_ERASE);
        assert!(rest.iter().any(|c| c.starts_with("\rThinking... ")));
        assert!(!written.iter().any(|c| c.contains("<think>")));
    }

    #[tokio::test]
    async fn finished_response_is_not_interrupted() {
        let chunks = Chunks::default();
        let writer = StyledWriter::new(chunks.clone(), TextStyle::plain());

        render_until_interrupted(
            stream::iter(vec![Ok("ls -la".to_string())]),
            &writer,
            &mut Indicator::Silent,
            false,
            std::future::pending::<()>(),
        )
        .await
        .unwrap();

        assert!(chunks.all().concat().contains("ls -la"));
    }

    #[tokio::test]
    async fn backend_failure_is_reported_not_interrupted() {
        let writer = StyledWriter::new(Chunks::default(), TextStyle::plain());

        let err = render_until_interrupted(
            stream::iter(vec![Err(LlmError::Connection("refused".to_string()))]),
            &writer,
            &mut Indicator::Silent,
            false,
            std::future::pending::<()>(),
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("refused"));
    }

    #[tokio::test]
    async fn silent_indicator_is_inert() {
        let mut indicator = Indicator::Silent;
        indicator.start();
        indicator.stop().await;
        indicator.stop().await;
    }
}
