//! Terminal rendering of streamed responses.
//!
//! - `writer`: styled, unbuffered output shared by everything below
//! - `spinner`: the "Thinking..." animation and the `ThinkingIndicator` seam
//! - `think`: the `<think>` segment filter
//! - `renderer`: drives a fragment stream through the pieces above

pub mod renderer;
pub mod spinner;
pub mod think;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_support;

pub use renderer::{render, RenderError, RESPONSE_FOOTER, RESPONSE_HEADER};
pub use spinner::{Spinner, SpinnerState, ThinkingIndicator};
pub use think::{RenderState, ThinkFilter, THINK_CLOSE, THINK_OPEN};
pub use writer::{StyledWriter, TextStyle};
