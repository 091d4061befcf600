//! Metrics collection.
//!
//! # Metrics
//! - `splitdb_replica_healthy` (gauge): 1=reachable, 0=unreachable, labeled
//!   per replica; updated once per replica per probe cycle

use metrics::gauge;

/// Record the probed health of one replica.
pub fn record_replica_health(replica: &str, healthy: bool) {
    let value = if healthy { 1.0 } else { 0.0 };
    gauge!("splitdb_replica_healthy", "replica" => replica.to_string()).set(value);
}
