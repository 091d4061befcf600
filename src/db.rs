//! Logical database facade.
//!
//! # Responsibilities
//! - Route reads to the selector's current replica pick
//! - Route writes, transactions, and preparation to the primary
//! - Fan liveness checks and pool tuning out to every backend

use parking_lot::Mutex;
use std::time::Duration;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::backend::{BackendHandle, PreparedStatement, Transaction};
use crate::balance::round_robin::RoundRobin;
use crate::config::validation::validate_config;
use crate::config::RoutingConfig;
use crate::error::Result;
use crate::health::monitor::HealthMonitor;
use crate::health::registry::ReplicaRegistry;
use crate::types::{ExecResult, QueryResult, Row, TxOptions, Value};

/// A logical database: one writable primary plus read replicas behind a
/// single connection-like surface.
///
/// Reads rotate across the replicas the background probe cycle currently
/// judges reachable; everything else reaches the primary. Context-less
/// methods pass a fresh, never-cancelled token; `_with` variants forward
/// the caller's token unchanged to the chosen backend, and any deadline
/// must come from that token.
pub struct LogicalDb {
    primary: BackendHandle,
    replicas: Vec<BackendHandle>,
    selector: RoundRobin,
    monitor: Mutex<HealthMonitor>,
}

impl std::fmt::Debug for LogicalDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogicalDb")
            .field("replicas", &self.replicas.len())
            .finish_non_exhaustive()
    }
}

impl LogicalDb {
    /// Build the logical database and start its health monitor.
    ///
    /// The replica order given here fixes the rotation order. Must be
    /// called within a tokio runtime.
    pub fn new(
        primary: BackendHandle,
        replicas: Vec<BackendHandle>,
        config: RoutingConfig,
    ) -> Result<Self> {
        validate_config(&config)?;

        let registry = Arc::new(ReplicaRegistry::new());
        let monitor =
            HealthMonitor::start(registry.clone(), replicas.clone(), config.health_check)?;
        let selector = RoundRobin::new(registry, primary.clone(), config.fallback_to_primary);

        tracing::info!(
            replicas = replicas.len(),
            fallback_to_primary = config.fallback_to_primary,
            "Logical database ready"
        );

        Ok(Self {
            primary,
            replicas,
            selector,
            monitor: Mutex::new(monitor),
        })
    }

    /// Verify connectivity to the primary and every configured replica,
    /// healthy or not, establishing connections if necessary.
    ///
    /// Checks run sequentially; the first failure aborts and is surfaced
    /// unchanged. This is independent of, and stricter than, the routing
    /// health check.
    pub async fn ping(&self) -> Result<()> {
        self.ping_with(&CancellationToken::new()).await
    }

    /// `ping` with a caller-supplied cancellation context.
    pub async fn ping_with(&self, ctx: &CancellationToken) -> Result<()> {
        self.primary.ping(ctx).await?;

        for replica in &self.replicas {
            replica.ping(ctx).await?;
        }

        Ok(())
    }

    /// Execute a query that returns rows, routed to a healthy replica.
    pub async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        self.query_with(&CancellationToken::new(), sql, params).await
    }

    /// `query` with a caller-supplied cancellation context.
    pub async fn query_with(
        &self,
        ctx: &CancellationToken,
        sql: &str,
        params: &[Value],
    ) -> Result<QueryResult> {
        self.selector.pick()?.query(ctx, sql, params).await
    }

    /// Execute a query expected to return at most one row, routed to a
    /// healthy replica. `None` when the result set is empty.
    pub async fn query_row(&self, sql: &str, params: &[Value]) -> Result<Option<Row>> {
        self.query_row_with(&CancellationToken::new(), sql, params)
            .await
    }

    /// `query_row` with a caller-supplied cancellation context.
    pub async fn query_row_with(
        &self,
        ctx: &CancellationToken,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<Row>> {
        self.selector.pick()?.query_row(ctx, sql, params).await
    }

    /// Execute a statement without returning rows, on the primary.
    pub async fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecResult> {
        self.execute_with(&CancellationToken::new(), sql, params)
            .await
    }

    /// `execute` with a caller-supplied cancellation context.
    pub async fn execute_with(
        &self,
        ctx: &CancellationToken,
        sql: &str,
        params: &[Value],
    ) -> Result<ExecResult> {
        self.primary.execute(ctx, sql, params).await
    }

    /// Start a transaction on the primary with driver defaults.
    pub async fn begin(&self) -> Result<Box<dyn Transaction>> {
        self.begin_with(&CancellationToken::new(), None).await
    }

    /// Start a transaction on the primary with the given options and a
    /// caller-supplied cancellation context.
    pub async fn begin_with(
        &self,
        ctx: &CancellationToken,
        opts: Option<TxOptions>,
    ) -> Result<Box<dyn Transaction>> {
        self.primary.begin(ctx, opts).await
    }

    /// Prepare a statement on the primary.
    pub async fn prepare(&self, sql: &str) -> Result<Box<dyn PreparedStatement>> {
        self.prepare_with(&CancellationToken::new(), sql).await
    }

    /// `prepare` with a caller-supplied cancellation context.
    pub async fn prepare_with(
        &self,
        ctx: &CancellationToken,
        sql: &str,
    ) -> Result<Box<dyn PreparedStatement>> {
        self.primary.prepare(ctx, sql).await
    }

    /// Set the maximum connection lifetime on the primary and every
    /// configured replica, regardless of current health.
    pub fn set_conn_max_lifetime(&self, lifetime: Option<Duration>) {
        self.primary.set_conn_max_lifetime(lifetime);
        for replica in &self.replicas {
            replica.set_conn_max_lifetime(lifetime);
        }
    }

    /// Set the idle-connection limit on the primary and every configured
    /// replica, regardless of current health.
    pub fn set_max_idle_conns(&self, n: usize) {
        self.primary.set_max_idle_conns(n);
        for replica in &self.replicas {
            replica.set_max_idle_conns(n);
        }
    }

    /// Set the open-connection limit on the primary and every configured
    /// replica, regardless of current health.
    pub fn set_max_open_conns(&self, n: usize) {
        self.primary.set_max_open_conns(n);
        for replica in &self.replicas {
            replica.set_max_open_conns(n);
        }
    }

    /// Stop the recurring health checks. Stopping twice is a lifecycle
    /// fault (`MonitorStopped`).
    pub fn stop_health_checks(&self) -> Result<()> {
        self.monitor.lock().stop()
    }

    /// Close every backend, best-effort.
    ///
    /// Stops the monitor first if it is still running. A close failure on
    /// one backend never prevents closing the rest; the first failure is
    /// surfaced after all backends have been attempted.
    pub async fn close(&self) -> Result<()> {
        {
            let mut monitor = self.monitor.lock();
            if monitor.is_running() {
                monitor.stop()?;
            }
        }

        let mut first_err = None;

        if let Err(e) = self.primary.close().await {
            tracing::warn!(backend = self.primary.label(), error = %e, "Close failed");
            first_err.get_or_insert(e);
        }
        for replica in &self.replicas {
            if let Err(e) = replica.close().await {
                tracing::warn!(backend = replica.label(), error = %e, "Close failed");
                first_err.get_or_insert(e);
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
