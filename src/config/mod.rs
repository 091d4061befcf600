//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RoutingConfig (validated, immutable)
//!     → consumed once at LogicalDb construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once accepted; routing policy is fixed per instance
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::HealthCheckConfig;
pub use schema::RoutingConfig;
