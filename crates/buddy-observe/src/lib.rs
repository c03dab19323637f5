//! Observability for linux-buddy: tracing subscriber setup.

pub mod tracing_setup;
