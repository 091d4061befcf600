//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Routing policy for a logical database.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Replica health check settings.
    pub health_check: HealthCheckConfig,

    /// Serve reads from the primary when no replica is healthy.
    ///
    /// When disabled, an empty healthy set fails reads with a distinct
    /// error instead, preserving strict read/write separation.
    pub fallback_to_primary: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            health_check: HealthCheckConfig::default(),
            fallback_to_primary: true,
        }
    }
}

/// Health check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Probe cycle interval in seconds. Must be positive.
    pub interval_secs: u64,

    /// Per-probe timeout in seconds. A replica that does not answer within
    /// this bound counts as unreachable for the cycle.
    pub probe_timeout_secs: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            interval_secs: 10,
            probe_timeout_secs: 5,
        }
    }
}

impl HealthCheckConfig {
    /// Probe cycle interval as a duration.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    /// Per-probe timeout as a duration.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}
