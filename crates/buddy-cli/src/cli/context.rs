//! Piped input handling.
//!
//! `cat error.log | buddy general "what went wrong?"` sends the log as extra
//! context ahead of the question.

use std::io::IsTerminal;

use anyhow::Context;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Read stdin to the end when it is not a terminal.
pub async fn read_piped_context() -> anyhow::Result<Option<String>> {
    if std::io::stdin().is_terminal() {
        return Ok(None);
    }
    read_context(tokio::io::stdin()).await
}

/// Read all of `input`. Blank input counts as no context.
pub async fn read_context<R>(mut input: R) -> anyhow::Result<Option<String>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = String::new();
    input
        .read_to_string(&mut buf)
        .await
        .context("failed to read piped input")?;

    tracing::debug!(bytes = buf.len(), "read piped context");
    Ok(Some(buf).filter(|text| !text.trim().is_empty()))
}
