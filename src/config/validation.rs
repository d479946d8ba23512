use crate::config::types::Config;
use crate::url::{normalize_url, BaseDomain};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_urls(config)?;
    validate_timing(config)?;
    validate_output(config)?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the base and the frontier seed
fn validate_urls(config: &Config) -> Result<(), ConfigError> {
    BaseDomain::parse(&config.base)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base '{}': {}", config.base, e)))?;

    normalize_url(&config.frontier).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid frontier '{}': {}", config.frontier, e))
    })?;

    Ok(())
}

/// Validates throttle, timeout and snapshot settings
fn validate_timing(config: &Config) -> Result<(), ConfigError> {
    if config.save_interval < 1 {
        return Err(ConfigError::Validation(format!(
            "save_interval must be >= 1, got {}",
            config.save_interval
        )));
    }

    if config.timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout must be >= 1 second, got {}",
            config.timeout
        )));
    }

    if config.min_wait > config.max_wait {
        return Err(ConfigError::Validation(format!(
            "min_wait ({}s) cannot exceed max_wait ({}s)",
            config.min_wait, config.max_wait
        )));
    }

    Ok(())
}

/// Validates output locations
fn validate_output(config: &Config) -> Result<(), ConfigError> {
    if config.save_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "save_dir cannot be empty".to_string(),
        ));
    }

    let index = &config.index_file_name;
    if index.is_empty() || index.contains('/') || index.contains('\\') || index == ".." {
        return Err(ConfigError::Validation(format!(
            "index_file_name must be a plain file name, got '{}'",
            index
        )));
    }

    Ok(())
}
