//! Replica health subsystem.
//!
//! # Data Flow
//! ```text
//! monitor.rs:
//!     Periodic timer
//!     → probe.rs (bounded-time ping per replica)
//!     → registry.rs (publish healthy subset)
//!
//! Readers (balance):
//!     registry.rs snapshot
//!     → rotation pick
//! ```
//!
//! # Design Decisions
//! - Probe failures are routine and never surfaced to callers
//! - Each cycle replaces the snapshot wholesale; cycles are independent
//! - Publication is a snapshot swap, never proportional to probe latency

pub mod monitor;
pub mod probe;
pub mod registry;
