//! Tracing subscriber initialization.
//!
//! Logs go to stderr: stdout carries the rendered response and the spinner,
//! and must stay free of log lines.
//!
//! # Usage
//!
//! ```no_run
//! use buddy_observe::tracing_setup::{init_tracing, LogFormat};
//!
//! // Warnings only, human-readable
//! init_tracing(false, LogFormat::Pretty).unwrap();
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(debug: bool) -> &'static str {
    if debug { "info,buddy=debug" } else { "warn" }
}

/// Initialize the global tracing subscriber.
///
/// - Respects `RUST_LOG`; otherwise uses [`default_directive`].
/// - Writes to stderr in the requested [`LogFormat`].
///
/// # Errors
///
/// Returns an error if the global subscriber has already been set.
pub fn init_tracing(debug: bool, format: LogFormat) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    let registry = tracing_subscriber::registry().with(env_filter);

    match format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
    }

    Ok(())
}
