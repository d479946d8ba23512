//! Configuration module for Site-Mirror
//!
//! This module builds the immutable run configuration from defaults, an
//! optional TOML file and command-line overrides, and validates it.
//!
//! # Example
//!
//! ```no_run
//! use site_mirror::config::{resolve_config, ConfigOverrides};
//! use std::path::Path;
//!
//! let config = resolve_config(Some(Path::new("mirror.toml")), ConfigOverrides::default()).unwrap();
//! println!("Snapshots every {} visits", config.save_interval);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ConfigOverrides, DEFAULT_BASE, DEFAULT_FRONTIER, DEFAULT_MAX_WAIT, DEFAULT_MIN_WAIT,
    DEFAULT_SAVE_DIR, DEFAULT_SAVE_INTERVAL, DEFAULT_TIMEOUT,
};

// Re-export parser functions
pub use parser::{load_config, read_config, resolve_config};
pub use validation::validate;
