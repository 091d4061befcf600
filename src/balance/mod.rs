//! Read load-balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Read request → round_robin.rs
//!     → health registry snapshot
//!     → rotation index = counter mod |healthy|
//!     → replica handle (or primary fallback / NoHealthyReplica)
//! ```
//!
//! # Design Decisions
//! - The rotation counter is a lock-free atomic, independent of registry
//!   publication; selection never blocks on probe activity
//! - No stickiness across healthy-set changes; rotation re-normalizes when
//!   the set changes size
//! - Fallback policy is fixed at construction, not per call

pub mod round_robin;
