//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via `tracing`; the crate never installs a
//!   subscriber, the embedding application does
//! - Metrics are cheap gauge updates through the `metrics` facade
//! - No exporter is bundled; the embedding application picks one

pub mod metrics;
