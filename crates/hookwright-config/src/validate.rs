//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_verify(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_verify(config: &Config) -> ConfigResult<()> {
    let v = &config.verify;

    if v.enabled && v.command.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "verify.command".to_owned(),
            message: "command must not be empty while verify is enabled".to_owned(),
        });
    }

    if v.info_duration_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "verify.info_duration_ms".to_owned(),
            message: "toast duration must be greater than zero".to_owned(),
        });
    }

    if v.error_duration_ms == 0 {
        return Err(ConfigError::ValidationError {
            field: "verify.error_duration_ms".to_owned(),
            message: "toast duration must be greater than zero".to_owned(),
        });
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.logging.level.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        });
    }

    let valid_formats = ["pretty", "compact", "json"];
    if !valid_formats.contains(&config.logging.format.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        });
    }

    Ok(())
}
