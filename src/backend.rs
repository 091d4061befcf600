//! Backend handle abstraction.
//!
//! # Responsibilities
//! - Represent one underlying database (primary or replica) as an opaque,
//!   reusable connection-pool handle
//! - Carry the driver operations the facade forwards verbatim
//! - Expose the pool tuning knobs the facade fans out to every backend
//!
//! # Design Decisions
//! - The core decides *which* handle runs an operation, never *how*; all
//!   execution semantics live behind this trait
//! - Every async operation takes a cancellation token, forwarded unchanged
//!   to the driver; the core enforces no timeout of its own

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::types::{ExecResult, QueryResult, Row, TxOptions, Value};

/// Shared, opaque handle to one backend database.
pub type BackendHandle = Arc<dyn Backend>;

/// A backend database, primary or replica.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Stable identifier used in logs and metrics (e.g. host name, pool id).
    fn label(&self) -> &str;

    /// Cheap reachability verification, establishing a connection if
    /// necessary. Must not execute application queries.
    async fn ping(&self, ctx: &CancellationToken) -> Result<()>;

    /// Execute a query that returns rows, typically a SELECT.
    async fn query(
        &self,
        ctx: &CancellationToken,
        sql: &str,
        params: &[Value],
    ) -> Result<QueryResult>;

    /// Execute a query expected to return at most one row.
    ///
    /// `None` when the result set is empty.
    async fn query_row(
        &self,
        ctx: &CancellationToken,
        sql: &str,
        params: &[Value],
    ) -> Result<Option<Row>> {
        Ok(self.query(ctx, sql, params).await?.rows.into_iter().next())
    }

    /// Execute a statement without returning rows (INSERT/UPDATE/DELETE).
    async fn execute(
        &self,
        ctx: &CancellationToken,
        sql: &str,
        params: &[Value],
    ) -> Result<ExecResult>;

    /// Start a transaction. `opts: None` uses the driver's defaults.
    async fn begin(
        &self,
        ctx: &CancellationToken,
        opts: Option<TxOptions>,
    ) -> Result<Box<dyn Transaction>>;

    /// Prepare a statement for repeated execution.
    async fn prepare(
        &self,
        ctx: &CancellationToken,
        sql: &str,
    ) -> Result<Box<dyn PreparedStatement>>;

    /// Set the maximum amount of time a pooled connection may be reused.
    /// `None` reuses connections forever.
    fn set_conn_max_lifetime(&self, lifetime: Option<Duration>);

    /// Set the maximum number of idle connections in the pool.
    fn set_max_idle_conns(&self, n: usize);

    /// Set the maximum number of open connections to the database.
    fn set_max_open_conns(&self, n: usize);

    /// Close the backend, releasing any open resources.
    async fn close(&self) -> Result<()>;
}

/// A transaction running on a single backend.
#[async_trait]
pub trait Transaction: Send + Sync {
    /// Commit the transaction.
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Roll the transaction back.
    async fn rollback(self: Box<Self>) -> Result<()>;

    /// Execute a query within the transaction.
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Execute a statement within the transaction.
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecResult>;
}

/// A prepared statement bound to a single backend.
#[async_trait]
pub trait PreparedStatement: Send + Sync {
    /// Query the prepared statement with parameters.
    async fn query(&self, params: &[Value]) -> Result<QueryResult>;

    /// Execute the prepared statement with parameters.
    async fn execute(&self, params: &[Value]) -> Result<ExecResult>;

    /// Close/deallocate the prepared statement.
    async fn close(self: Box<Self>) -> Result<()>;
}
