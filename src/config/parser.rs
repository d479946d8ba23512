use crate::config::types::{Config, ConfigOverrides};
use crate::config::validation::validate;
use crate::url::{normalize_url, BaseDomain};
use crate::ConfigError;
use std::path::Path;

/// Reads a TOML configuration file without validating it
///
/// Keys missing from the file keep their defaults.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Loads and validates a configuration file from the given path
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use site_mirror::config::load_config;
///
/// let config = load_config(Path::new("mirror.toml")).unwrap();
/// println!("Crawling under: {}", config.base);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config = read_config(path)?;
    validate(&config)?;
    Ok(config)
}

/// Builds the configuration for a run
///
/// Defaults, then the optional TOML file, then command-line overrides.
/// The result is validated and its frontier seed is stored in canonical form.
///
/// # Arguments
///
/// * `path` - Optional path to a TOML configuration file
/// * `overrides` - Values given on the command line
pub fn resolve_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => Config::default(),
    };

    config.apply_overrides(overrides);
    validate(&config)?;

    let frontier = normalize_url(&config.frontier)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid frontier: {}", e)))?;
    config.frontier = frontier.to_string();

    if let Ok(base) = BaseDomain::parse(&config.base) {
        if !base.contains(&frontier) {
            tracing::warn!(
                "Frontier {} lies outside base {}; only the seed itself will be visited",
                config.frontier,
                config.base
            );
        }
    }

    Ok(config)
}
