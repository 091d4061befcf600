//! Background replica health monitoring.
//!
//! # Responsibilities
//! - Periodically probe every configured replica
//! - Publish each cycle's healthy subset to the registry
//! - Stop exactly once on the cancellation signal

use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::time::{self, MissedTickBehavior};

use crate::backend::BackendHandle;
use crate::config::HealthCheckConfig;
use crate::error::{Error, Result};
use crate::health::probe::probe_backend;
use crate::health::registry::ReplicaRegistry;
use crate::observability::metrics;

/// Recurring probe cycle over the configured replica set.
///
/// One monitor runs per logical database. The registry is pre-populated
/// with every replica before the first tick, so reads issued before the
/// first cycle completes are not starved.
pub struct HealthMonitor {
    stop: Option<oneshot::Sender<()>>,
}

impl HealthMonitor {
    /// Start the recurring cycle. Must be called within a tokio runtime.
    ///
    /// Fails without spawning anything when the interval is not positive.
    pub fn start(
        registry: Arc<ReplicaRegistry>,
        replicas: Vec<BackendHandle>,
        config: HealthCheckConfig,
    ) -> Result<Self> {
        if config.interval().is_zero() {
            return Err(Error::Config(
                "health check interval must be positive".to_string(),
            ));
        }

        // Optimistic initial assumption: every replica is healthy until
        // the first cycle says otherwise.
        registry.set_healthy(replicas.clone());

        let (stop_tx, stop_rx) = oneshot::channel();
        tokio::spawn(run(registry, replicas, config, stop_rx));

        Ok(Self {
            stop: Some(stop_tx),
        })
    }

    /// Whether the stop signal is still unconsumed.
    pub fn is_running(&self) -> bool {
        self.stop.is_some()
    }

    /// Signal cancellation. The signal is consumed exactly once; stopping
    /// an already-stopped monitor is a lifecycle fault.
    ///
    /// An in-flight cycle finishes its remaining probes and may publish
    /// one final set; no cycle is scheduled after that.
    pub fn stop(&mut self) -> Result<()> {
        let stop = self.stop.take().ok_or(Error::MonitorStopped)?;
        // The receiver is gone only if the task already exited.
        let _ = stop.send(());
        Ok(())
    }
}

async fn run(
    registry: Arc<ReplicaRegistry>,
    replicas: Vec<BackendHandle>,
    config: HealthCheckConfig,
    mut stop: oneshot::Receiver<()>,
) {
    tracing::info!(
        interval_secs = config.interval_secs,
        probe_timeout_secs = config.probe_timeout_secs,
        replicas = replicas.len(),
        "Health monitor starting"
    );

    let period = config.interval();
    // First cycle runs one full interval after start; the optimistic
    // pre-population covers reads until then.
    let mut ticker = time::interval_at(time::Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = &mut stop => {
                tracing::info!("Health monitor received stop signal, exiting loop");
                break;
            }
            _ = ticker.tick() => {
                let healthy = check_all(&replicas, &config).await;
                tracing::debug!(
                    healthy = healthy.len(),
                    total = replicas.len(),
                    "Publishing healthy replica set"
                );
                registry.set_healthy(healthy);
            }
        }
    }
}

/// Probe every replica once. Exclusion is immediate, with no retry within
/// the cycle; standing is reconsidered from scratch on the next tick.
async fn check_all(
    replicas: &[BackendHandle],
    config: &HealthCheckConfig,
) -> Vec<BackendHandle> {
    let timeout = config.probe_timeout();
    let mut healthy = Vec::with_capacity(replicas.len());

    for replica in replicas {
        let reachable = probe_backend(replica.as_ref(), timeout).await;
        metrics::record_replica_health(replica.label(), reachable);

        if reachable {
            healthy.push(replica.clone());
        }
    }

    healthy
}
