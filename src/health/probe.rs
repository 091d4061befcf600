//! Replica reachability probing.
//!
//! # Responsibilities
//! - Perform a single bounded-time probe against one backend
//! - Classify errors and timeouts as unreachable

use std::time::Duration;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::backend::Backend;

/// Probe one backend, true if it answered within `timeout`.
///
/// Uses the backend's ping, not query execution. A failed or timed-out
/// probe only excludes the backend from the current cycle's healthy set.
pub async fn probe_backend(backend: &dyn Backend, timeout: Duration) -> bool {
    let ctx = CancellationToken::new();

    match time::timeout(timeout, backend.ping(&ctx)).await {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            tracing::warn!(replica = backend.label(), error = %e, "Health probe failed: backend error");
            false
        }
        Err(_) => {
            tracing::warn!(replica = backend.label(), "Health probe failed: timeout");
            false
        }
    }
}
