//! Error types for the logical database.

use thiserror::Error;

/// Driver error carried through the facade unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error type for logical database operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Error returned by an underlying backend during a query, exec,
    /// prepare, transaction, ping, or close call. Never retried or
    /// rewrapped beyond this variant.
    #[error("backend error: {0}")]
    Backend(#[source] BoxError),

    /// No replica is currently healthy and fallback to the primary is
    /// disabled for this instance.
    #[error("no healthy read replica available")]
    NoHealthyReplica,

    /// The health monitor's stop signal was already consumed.
    #[error("health monitor already stopped")]
    MonitorStopped,

    /// Rejected at construction time, before any backend is touched.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for logical database operations.
pub type Result<T> = std::result::Result<T, Error>;
