//! Configuration loading from TOML files

mod catalog;

pub use catalog::{default_catalog, load_catalog, parse_catalog, Catalog};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ConfigError::ValidationError(message.into())
    }
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Check a percentage field (crit chance, agility) is within 0-100
pub(crate) fn check_percent(owner: &str, field: &str, value: u32) -> Result<(), ConfigError> {
    if value > 100 {
        return Err(ConfigError::invalid(format!(
            "{}: {} must be between 0 and 100, got {}",
            owner, field, value
        )));
    }
    Ok(())
}
