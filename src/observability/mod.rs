//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via the tracing crate
//! - The run id flows through all log lines of a smoke run
//! - Filter comes from config, overridable via `RUST_LOG`

pub mod logging;

pub use logging::init_logging;
