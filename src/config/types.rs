use serde::Deserialize;
use std::path::PathBuf;

/// Default base host/path prefix
pub const DEFAULT_BASE: &str = "github.com/antsam/";

/// Default crawl seed
pub const DEFAULT_FRONTIER: &str = "https://github.com/antsam/";

/// Default mirror and state directory
pub const DEFAULT_SAVE_DIR: &str = "./data/";

/// Default number of completed visits between snapshots
pub const DEFAULT_SAVE_INTERVAL: u32 = 5;

/// Default lower bound of the throttle window, in seconds
pub const DEFAULT_MIN_WAIT: u64 = 10;

/// Default upper bound of the throttle window, in seconds
pub const DEFAULT_MAX_WAIT: u64 = 15;

/// Default fetch timeout, in seconds
pub const DEFAULT_TIMEOUT: u64 = 10;

/// Main configuration structure for Site-Mirror
///
/// Immutable once the crawl starts. Every key is optional in the TOML file;
/// missing keys take the defaults above.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base host and path prefix that bounds the crawl, e.g. `example.com/blog/`
    pub base: String,

    /// URL the crawl starts from
    pub frontier: String,

    /// Directory receiving the mirror and the state files
    #[serde(rename = "save-dir")]
    pub save_dir: PathBuf,

    /// Completed visits between frontier/visited snapshots
    #[serde(rename = "save-interval")]
    pub save_interval: u32,

    /// Minimum delay between visits (seconds)
    #[serde(rename = "min-wait")]
    pub min_wait: u64,

    /// Maximum delay between visits (seconds)
    #[serde(rename = "max-wait")]
    pub max_wait: u64,

    /// Fetch timeout (seconds)
    pub timeout: u64,

    /// Resume from the state files in `save_dir`
    pub resume: bool,

    /// Sanitize textual content before saving
    pub clean: bool,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// File name used for directory-style textual pages
    #[serde(rename = "index-file-name")]
    pub index_file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE.to_string(),
            frontier: DEFAULT_FRONTIER.to_string(),
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
            save_interval: DEFAULT_SAVE_INTERVAL,
            min_wait: DEFAULT_MIN_WAIT,
            max_wait: DEFAULT_MAX_WAIT,
            timeout: DEFAULT_TIMEOUT,
            resume: false,
            clean: false,
            user_agent: format!("site-mirror/{}", env!("CARGO_PKG_VERSION")),
            index_file_name: crate::storage::DEFAULT_INDEX_FILE.to_string(),
        }
    }
}

/// Values supplied on the command line; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base: Option<String>,
    pub frontier: Option<String>,
    pub save_dir: Option<PathBuf>,
    pub save_interval: Option<u32>,
    pub min_wait: Option<u64>,
    pub max_wait: Option<u64>,
    pub timeout: Option<u64>,
    pub resume: bool,
    pub clean: bool,
}

impl Config {
    /// Applies command-line values on top of this configuration
    ///
    /// Boolean flags can only switch a setting on.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(base) = overrides.base {
            self.base = base;
        }
        if let Some(frontier) = overrides.frontier {
            self.frontier = frontier;
        }
        if let Some(save_dir) = overrides.save_dir {
            self.save_dir = save_dir;
        }
        if let Some(save_interval) = overrides.save_interval {
            self.save_interval = save_interval;
        }
        if let Some(min_wait) = overrides.min_wait {
            self.min_wait = min_wait;
        }
        if let Some(max_wait) = overrides.max_wait {
            self.max_wait = max_wait;
        }
        if let Some(timeout) = overrides.timeout {
            self.timeout = timeout;
        }
        self.resume |= overrides.resume;
        self.clean |= overrides.clean;
    }
}
