//! "Thinking..." spinner drawn while the backend reasons.
//!
//! The animation runs as a tokio task that redraws the current line every
//! 100ms. [`Spinner::stop`] cancels the task and waits for it to erase the
//! line, so once it returns the terminal belongs to the caller again.

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::writer::StyledWriter;

/// Label drawn in front of the rotating symbol.
pub const SPINNER_LABEL: &str = "Thinking... ";

/// Rotation sequence, one symbol per tick.
pub const SPINNER_SYMBOLS: [char; 4] = ['|', '/', '-', '\\'];

/// Redraw period.
pub const SPINNER_PERIOD: Duration = Duration::from_millis(100);

/// Blanks out the spinner line and returns the cursor to column 0.
pub const SPINNER_ERASE: &str = "\r                     \r";

/// Something that signals "output is suppressed, work is happening".
///
/// `start` must be a no-op while running; `stop` must be a no-op while
/// stopped, and once its future resolves the indicator must not write again.
pub trait ThinkingIndicator: Send {
    fn start(&mut self);

    fn stop(&mut self) -> impl Future<Output = ()> + Send;
}

/// Whether the spinner animation is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerState {
    Stopped,
    Running,
}

struct Animation {
    cancel: CancellationToken,
    handle: JoinHandle<io::Result<()>>,
}

/// Single-line terminal spinner. At most one animation task per instance.
pub struct Spinner {
    writer: StyledWriter,
    period: Duration,
    animation: Option<Animation>,
}

impl Spinner {
    pub fn new(writer: StyledWriter) -> Self {
        Self {
            writer,
            period: SPINNER_PERIOD,
            animation: None,
        }
    }

    pub fn state(&self) -> SpinnerState {
        if self.animation.is_some() {
            SpinnerState::Running
        } else {
            SpinnerState::Stopped
        }
    }

    /// Launch the animation task. Must be called within a tokio runtime.
    pub fn start(&mut self) {
        if self.animation.is_some() {
            return;
        }

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(animate(self.writer.clone(), cancel.clone(), self.period));
        self.animation = Some(Animation { cancel, handle });
        debug!("spinner started");
    }

    /// Stop the animation and wait until its line has been erased.
    pub async fn stop(&mut self) {
        let Some(animation) = self.animation.take() else {
            return;
        };

        animation.cancel.cancel();
        match animation.handle.await {
            Ok(Ok(())) => debug!("spinner stopped"),
            Ok(Err(err)) => warn!(error = %err, "spinner could not draw to the terminal"),
            Err(err) => warn!(error = %err, "spinner task ended abnormally"),
        }
    }
}

impl ThinkingIndicator for Spinner {
    fn start(&mut self) {
        Spinner::start(self);
    }

    async fn stop(&mut self) {
        Spinner::stop(self).await;
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        // Fallback only: callers are expected to await `stop`. The task still
        // erases its line, but nothing orders that write before the caller's
        // next one.
        if let Some(animation) = self.animation.take() {
            debug!("spinner dropped while running");
            animation.cancel.cancel();
        }
    }
}

async fn animate(
    writer: StyledWriter,
    cancel: CancellationToken,
    period: Duration,
) -> io::Result<()> {
    let mut ticker = tokio::time::interval(period);
    let mut frame = 0usize;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let symbol = SPINNER_SYMBOLS[frame % SPINNER_SYMBOLS.len()];
                writer.write(&format!("\r{SPINNER_LABEL}{symbol}"))?;
                frame = frame.wrapping_add(1);
            }
        }
    }

    writer.write(SPINNER_ERASE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_support::Capture;
    use crate::render::writer::TextStyle;

    fn spinner_over(capture: &Capture) -> Spinner {
        Spinner::new(StyledWriter::new(capture.clone(), TextStyle::plain()))
    }

    #[tokio::test]
    async fn frames_rotate_then_line_is_erased() {
        let capture = Capture::default();
        let mut spinner = spinner_over(&capture);

        spinner.start();
        assert_eq!(spinner.state(), SpinnerState::Running);
        tokio::time::sleep(Duration::from_millis(450)).await;
        spinner.stop().await;
        assert_eq!(spinner.state(), SpinnerState::Stopped);

        let chunks = capture.chunks();
        let (erase, frames) = chunks.split_last().unwrap();
        assert_eq!(erase, SPINNER_ERASE);
        assert!(frames.len() >= 4, "expected at least 4 frames, got {frames:?}");
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame, &format!("\rThinking... {}", SPINNER_SYMBOLS[i % 4]));
        }
    }

    #[tokio::test]
    async fn nothing_is_written_after_stop_returns() {
        let capture = Capture::default();
        let mut spinner = spinner_over(&capture);

        spinner.start();
        tokio::time::sleep(Duration::from_millis(120)).await;
        spinner.stop().await;
        let written = capture.chunks().len();

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(capture.chunks().len(), written);
        assert_eq!(capture.chunks().last().unwrap(), SPINNER_ERASE);
    }

    #[tokio::test]
    async fn stop_when_stopped_is_a_silent_no_op() {
        let capture = Capture::default();
        let mut spinner = spinner_over(&capture);

        spinner.stop().await;
        assert!(capture.chunks().is_empty());

        spinner.start();
        spinner.stop().await;
        spinner.stop().await;

        let erases = capture
            .chunks()
            .iter()
            .filter(|c| c.as_str() == SPINNER_ERASE)
            .count();
        assert_eq!(erases, 1);
    }

    #[tokio::test]
    async fn start_while_running_keeps_a_single_animation() {
        let capture = Capture::default();
        let mut spinner = spinner_over(&capture);

        spinner.start();
        spinner.start();
        tokio::time::sleep(Duration::from_millis(150)).await;
        spinner.stop().await;

        let erases = capture
            .chunks()
            .iter()
            .filter(|c| c.as_str() == SPINNER_ERASE)
            .count();
        assert_eq!(erases, 1);
        // A second task would have drawn '|' twice at the first tick.
        assert_ne!(capture.chunks()[0], capture.chunks()[1]);
    }

    #[tokio::test]
    async fn dropping_a_running_spinner_still_erases_the_line() {
        let capture = Capture::default();
        let mut spinner = spinner_over(&capture);

        spinner.start();
        drop(spinner);
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(capture.chunks().last().unwrap(), SPINNER_ERASE);
    }

    #[tokio::test]
    async fn restart_after_stop_draws_again() {
        let capture = Capture::default();
        let mut spinner = spinner_over(&capture);

        spinner.start();
        spinner.stop().await;
        spinner.start();
        spinner.stop().await;

        let erases = capture
            .chunks()
            .iter()
            .filter(|c| c.as_str() == SPINNER_ERASE)
            .count();
        assert_eq!(erases, 2);
    }
}
