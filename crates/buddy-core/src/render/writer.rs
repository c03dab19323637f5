//! Styled, unbuffered terminal writer.
//!
//! `StyledWriter` wraps every non-empty write in a fixed pair of ANSI style
//! markers and pushes it to the sink in one locked write + flush, so output
//! from the render loop and the spinner task never splits mid-write.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Prefix/suffix markers applied around every styled write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    prefix: String,
    suffix: String,
}

impl TextStyle {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Bold green, the assistant's response style.
    ///
    /// The bytes are fixed: `ESC[1m ESC[32m` before and `ESC[0m` after every
    /// write, in that order. Do not derive them from `console::Style`.
    pub fn bold_green() -> Self {
        Self::new("\u{1b}[1m\u{1b}[32m", "\u{1b}[0m")
    }

    /// No markers at all; used when colors are disabled.
    pub fn plain() -> Self {
        Self::new("", "")
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::bold_green()
    }
}

/// Append-only writer that applies a constant style to everything it emits.
///
/// Clones share the same sink.
#[derive(Clone)]
pub struct StyledWriter {
    sink: Arc<Mutex<Box<dyn Write + Send>>>,
    style: TextStyle,
}

impl StyledWriter {
    pub fn new<W>(sink: W, style: TextStyle) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            sink: Arc::new(Mutex::new(Box::new(sink))),
            style,
        }
    }

    /// Writer over the process's stdout.
    pub fn stdout(style: TextStyle) -> Self {
        Self::new(io::stdout(), style)
    }

    /// Write styled text with no line terminator. Empty text writes nothing.
    pub fn write(&self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }
        self.emit(&format!("{}{text}{}", self.style.prefix, self.style.suffix))
    }

    /// Write styled text followed by a line terminator.
    pub fn write_line(&self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return self.write_line_empty();
        }
        self.emit(&format!(
            "{}{text}{}\n",
            self.style.prefix, self.style.suffix
        ))
    }

    /// Write a bare, unstyled line terminator.
    pub fn write_line_empty(&self) -> io::Result<()> {
        self.emit("\n")
    }

    fn emit(&self, chunk: &str) -> io::Result<()> {
        let mut sink = self.sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        sink.write_all(chunk.as_bytes())?;
        sink.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::test_support::Capture;

    #[test]
    fn wraps_text_in_style_markers() {
        let capture = Capture::default();
        let writer = StyledWriter::new(capture.clone(), TextStyle::new("<b>", "</b>"));

        writer.write("ls -la").unwrap();
        writer.write_line("done").unwrap();

        assert_eq!(capture.contents(), "<b>ls -la</b><b>done</b>\n");
    }

    #[test]
    fn empty_line_is_unstyled() {
        let capture = Capture::default();
        let writer = StyledWriter::new(capture.clone(), TextStyle::bold_green());

        writer.write_line_empty().unwrap();
        writer.write_line("").unwrap();

        assert_eq!(capture.contents(), "\n\n");
    }

    #[test]
    fn empty_write_emits_nothing() {
        let capture = Capture::default();
        let writer = StyledWriter::new(capture.clone(), TextStyle::bold_green());

        writer.write("").unwrap();

        assert!(capture.chunks().is_empty());
    }

    #[test]
    fn each_write_reaches_the_sink_as_one_chunk() {
        let capture = Capture::default();
        let writer = StyledWriter::new(capture.clone(), TextStyle::bold_green());
        let clone = writer.clone();

        writer.write("a").unwrap();
        clone.write_line("b").unwrap();

        assert_eq!(
            capture.chunks(),
            vec![
                "\u{1b}[1m\u{1b}[32ma\u{1b}[0m".to_string(),
                "\u{1b}[1m\u{1b}[32mb\u{1b}[0m\n".to_string(),
            ]
        );
    }

    #[test]
    fn sink_failure_propagates() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let writer = StyledWriter::new(Broken, TextStyle::plain());
        let err = writer.write("x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
