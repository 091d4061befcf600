//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval and probe timeout must be positive)
//! - Runs before a config is accepted at construction time

use crate::config::schema::RoutingConfig;
use crate::error::Error;

/// Validate a routing configuration.
pub fn validate_config(config: &RoutingConfig) -> Result<(), Error> {
    if config.health_check.interval_secs == 0 {
        return Err(Error::Config(
            "health_check.interval_secs must be positive".to_string(),
        ));
    }
    if config.health_check.probe_timeout_secs == 0 {
        return Err(Error::Config(
            "health_check.probe_timeout_secs must be positive".to_string(),
        ));
    }
    Ok(())
}
