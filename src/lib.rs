//! Logical read/write-splitting database library.
//!
//! Abstracts one writable primary and a pool of read replicas into a single
//! connection-like surface. Writes, transactions, and statement preparation
//! always reach the primary; reads rotate across the replicas a background
//! probe cycle currently judges reachable, optionally falling back to the
//! primary when none are.

pub mod backend;
pub mod balance;
pub mod config;
pub mod db;
pub mod error;
pub mod health;
pub mod observability;
pub mod types;

pub use backend::{Backend, BackendHandle, PreparedStatement, Transaction};
pub use config::{HealthCheckConfig, RoutingConfig};
pub use db::LogicalDb;
pub use error::{Error, Result};
