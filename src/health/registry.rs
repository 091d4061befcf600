//! Published view of currently-healthy replicas.
//!
//! # Responsibilities
//! - Own the snapshot of replicas judged reachable by the last probe cycle
//! - Give readers torn-free snapshots without blocking on probe activity

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::backend::BackendHandle;

/// Concurrently readable healthy-replica set.
///
/// The monitor replaces the snapshot wholesale each cycle; readers load
/// the current snapshot and may iterate it freely while a replacement
/// lands. Only handles drawn from the configured replica set are ever
/// published.
pub struct ReplicaRegistry {
    healthy: ArcSwap<Vec<BackendHandle>>,
}

impl ReplicaRegistry {
    /// Create a registry with an empty healthy set.
    pub fn new() -> Self {
        Self {
            healthy: ArcSwap::from_pointee(Vec::new()),
        }
    }

    /// Atomically replace the published healthy set.
    ///
    /// The sequence is taken by value; nothing can mutate it after the
    /// call, and readers holding earlier snapshots are unaffected.
    pub fn set_healthy(&self, replicas: Vec<BackendHandle>) {
        self.healthy.store(Arc::new(replicas));
    }

    /// Snapshot of the healthy set as of the last publication.
    ///
    /// Empty means "assume no replica is reachable".
    pub fn get_healthy(&self) -> Arc<Vec<BackendHandle>> {
        self.healthy.load_full()
    }
}

impl Default for ReplicaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
