//! Round-robin replica selection.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::backend::BackendHandle;
use crate::error::{Error, Result};
use crate::health::registry::ReplicaRegistry;

/// Round-robin selector over the currently-healthy replica set.
///
/// Stores a shared rotation counter; fairness holds within the current
/// healthy set and re-normalizes whenever the set changes size. Counter
/// wraparound is benign under the modulo.
pub struct RoundRobin {
    registry: Arc<ReplicaRegistry>,
    primary: BackendHandle,
    counter: AtomicU64,
    fallback_to_primary: bool,
}

impl RoundRobin {
    pub fn new(
        registry: Arc<ReplicaRegistry>,
        primary: BackendHandle,
        fallback_to_primary: bool,
    ) -> Self {
        Self {
            registry,
            primary,
            counter: AtomicU64::new(0),
            fallback_to_primary,
        }
    }

    /// Pick the backend for one read.
    ///
    /// On an empty healthy set, returns the primary when fallback is
    /// enabled and fails with `NoHealthyReplica` when it is not.
    pub fn pick(&self) -> Result<BackendHandle> {
        // The counter advances on every pick, including the empty-set path.
        let count = self.counter.fetch_add(1, Ordering::Relaxed).wrapping_add(1);

        let healthy = self.registry.get_healthy();
        if healthy.is_empty() {
            if !self.fallback_to_primary {
                return Err(Error::NoHealthyReplica);
            }
            return Ok(self.primary.clone());
        }

        let index = (count % healthy.len() as u64) as usize;
        Ok(healthy[index].clone())
    }
}
