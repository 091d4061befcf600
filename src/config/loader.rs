//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::RoutingConfig;
use crate::config::validation::validate_config;
use crate::error::Error;

/// Load and validate a routing configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RoutingConfig, Error> {
    let content = fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("read {}: {}", path.display(), e)))?;
    let config: RoutingConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("parse {}: {}", path.display(), e)))?;

    validate_config(&config)?;

    Ok(config)
}
