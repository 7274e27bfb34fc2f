//! Observability subsystem.
//!
//! Structured logging via `tracing` and cheap metric updates via the
//! `metrics` facade; an exporter is the embedding environment's choice.

pub mod logging;
pub mod metrics;
