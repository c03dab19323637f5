//! Think-segment filter.
//!
//! Reasoning models wrap their chain of thought in `<think>` ... `</think>`.
//! [`ThinkFilter`] hides everything inside that segment and keeps a
//! [`ThinkingIndicator`] running for its duration.
//!
//! Sentinels are matched with a plain substring test per fragment. A sentinel
//! split across two fragments is not recognised.

use super::spinner::ThinkingIndicator;

/// Opens a think-segment.
pub const THINK_OPEN: &str = "<think>";

/// Closes a think-segment.
pub const THINK_CLOSE: &str = "</think>";

/// Where the renderer is within one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// No fragment seen yet.
    Idle,
    /// Emitting visible text.
    Streaming,
    /// Inside a think-segment: output suppressed, indicator running.
    Thinking,
}

/// Single-pass fragment filter bound to a thinking indicator.
pub struct ThinkFilter<'a, I: ThinkingIndicator> {
    indicator: &'a mut I,
    state: RenderState,
}

impl<'a, I: ThinkingIndicator> ThinkFilter<'a, I> {
    pub fn new(indicator: &'a mut I) -> Self {
        Self {
            indicator,
            state: RenderState::Idle,
        }
    }

    pub fn state(&self) -> RenderState {
        self.state
    }

    /// Consume one fragment, returning the text to show, if any.
    ///
    /// A fragment carrying a sentinel is dropped whole, including any text
    /// around the sentinel. `THINK_OPEN` is checked first, so a fragment can
    /// never open and close a segment in one step.
    pub async fn feed<'f>(&mut self, fragment: &'f str) -> Option<&'f str> {
        if fragment.contains(THINK_OPEN) && self.state != RenderState::Thinking {
            self.state = RenderState::Thinking;
            self.indicator.start();
            return None;
        }

        if fragment.contains(THINK_CLOSE) && self.state == RenderState::Thinking {
            self.state = RenderState::Streaming;
            self.indicator.stop().await;
            return None;
        }

        if self.state == RenderState::Thinking {
            return None;
        }

        self.state = RenderState::Streaming;
        Some(fragment)
    }
}
