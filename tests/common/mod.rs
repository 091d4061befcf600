//! Shared mock backend for integration tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use splitdb::backend::{Backend, BackendHandle, PreparedStatement, Transaction};
use splitdb::error::{Error, Result};
use splitdb::types::{ExecResult, QueryResult, Row, TxOptions, Value};

/// In-memory backend with scriptable reachability and call counters.
///
/// Queries answer with the backend's label in the first column, so tests
/// can observe which backend served a read.
pub struct MockBackend {
    label: String,
    reachable: AtomicBool,
    hang_pings: AtomicBool,
    fail_close: AtomicBool,
    pub pings: AtomicUsize,
    pub queries: AtomicUsize,
    pub execs: AtomicUsize,
    pub begins: AtomicUsize,
    pub prepares: AtomicUsize,
    pub closes: AtomicUsize,
    pub max_lifetime_calls: Mutex<Vec<Option<Duration>>>,
    pub max_idle_calls: Mutex<Vec<usize>>,
    pub max_open_calls: Mutex<Vec<usize>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn new(label: &str) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            reachable: AtomicBool::new(true),
            hang_pings: AtomicBool::new(false),
            fail_close: AtomicBool::new(false),
            pings: AtomicUsize::new(0),
            queries: AtomicUsize::new(0),
            execs: AtomicUsize::new(0),
            begins: AtomicUsize::new(0),
            prepares: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
            max_lifetime_calls: Mutex::new(Vec::new()),
            max_idle_calls: Mutex::new(Vec::new()),
            max_open_calls: Mutex::new(Vec::new()),
        })
    }

    pub fn handle(self: &Arc<Self>) -> BackendHandle {
        self.clone()
    }

    pub fn set_reachable(&self, up: bool) {
        self.reachable.store(up, Ordering::SeqCst);
    }

    /// Make pings hang well past any probe timeout.
    pub fn set_hang_pings(&self, hang: bool) {
        self.hang_pings.store(hang, Ordering::SeqCst);
    }

    pub fn set_fail_close(&self, fail: bool) {
        self.fail_close.store(fail, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> Result<()> {
        if self.reachable.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(Error::Backend(
                format!("{}: connection refused", self.label).into(),
            ))
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    fn label(&self) -> &str {
        &self.label
    }

    async fn ping(&self, _ctx: &CancellationToken) -> Result<()> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        if self.hang_pings.load(Ordering::SeqCst) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }
        self.check_reachable()
    }

    async fn query(
        &self,
        _ctx: &CancellationToken,
        _sql: &str,
        _params: &[Value],
    ) -> Result<QueryResult> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        Ok(QueryResult {
            columns: vec!["served_by".to_string()],
            rows: vec![Row {
                values: vec![Value::Text(self.label.clone())],
            }],
        })
    }

    async fn execute(
        &self,
        _ctx: &CancellationToken,
        _sql: &str,
        _params: &[Value],
    ) -> Result<ExecResult> {
        self.execs.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        Ok(ExecResult {
            rows_affected: 1,
            last_insert_id: Some(1),
        })
    }

    async fn begin(
        &self,
        _ctx: &CancellationToken,
        _opts: Option<TxOptions>,
    ) -> Result<Box<dyn Transaction>> {
        self.begins.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        Ok(Box::new(MockTransaction))
    }

    async fn prepare(
        &self,
        _ctx: &CancellationToken,
        _sql: &str,
    ) -> Result<Box<dyn PreparedStatement>> {
        self.prepares.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        Ok(Box::new(MockStatement))
    }

    fn set_conn_max_lifetime(&self, lifetime: Option<Duration>) {
        self.max_lifetime_calls.lock().push(lifetime);
    }

    fn set_max_idle_conns(&self, n: usize) {
        self.max_idle_calls.lock().push(n);
    }

    fn set_max_open_conns(&self, n: usize) {
        self.max_open_calls.lock().push(n);
    }

    async fn close(&self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close.load(Ordering::SeqCst) {
            return Err(Error::Backend(
                format!("{}: close failed", self.label).into(),
            ));
        }
        Ok(())
    }
}

struct MockTransaction;

#[async_trait]
impl Transaction for MockTransaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        Ok(())
    }

    async fn query(&self, _sql: &str, _params: &[Value]) -> Result<QueryResult> {
        Ok(QueryResult::default())
    }

    async fn execute(&self, _sql: &str, _params: &[Value]) -> Result<ExecResult> {
        Ok(ExecResult::default())
    }
}

struct MockStatement;

#[async_trait]
impl PreparedStatement for MockStatement {
    async fn query(&self, _params: &[Value]) -> Result<QueryResult> {
        Ok(QueryResult::default())
    }

    async fn execute(&self, _params: &[Value]) -> Result<ExecResult> {
        Ok(ExecResult::default())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        Ok(())
    }
}
