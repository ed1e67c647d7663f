//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Largest accepted `crypto.cache_capacity`.
pub const MAX_CACHE_CAPACITY: usize = 1_048_576;

/// Accepted `logging.level` values.
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Accepted `logging.format` values.
pub const LOG_FORMATS: [&str; 4] = ["pretty", "compact", "json", "full"];

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_crypto(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_crypto(config: &Config) -> ConfigResult<()> {
    if config.crypto.cache_capacity > MAX_CACHE_CAPACITY {
        return Err(ConfigError::validation(
            "crypto.cache_capacity",
            format!(
                "{} exceeds the maximum of {MAX_CACHE_CAPACITY}",
                config.crypto.cache_capacity
            ),
        ));
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let logging = &config.logging;

    if !LOG_LEVELS.contains(&logging.level.as_str()) {
        return Err(ConfigError::validation(
            "logging.level",
            format!(
                "unsupported log level '{}'; expected one of: {}",
                logging.level,
                LOG_LEVELS.join(", ")
            ),
        ));
    }

    if !LOG_FORMATS.contains(&logging.format.as_str()) {
        return Err(ConfigError::validation(
            "logging.format",
            format!(
                "unsupported log format '{}'; expected one of: {}",
                logging.format,
                LOG_FORMATS.join(", ")
            ),
        ));
    }

    if let Some(empty) = logging.directives.iter().position(|d| d.trim().is_empty()) {
        return Err(ConfigError::validation(
            "logging.directives",
            format!("directive #{empty} is empty"),
        ));
    }

    Ok(())
}
