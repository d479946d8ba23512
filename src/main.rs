//! Site-Mirror main entry point
//!
//! This is the command-line interface for the Site-Mirror crawler.

use anyhow::Context;
use clap::Parser;
use site_mirror::config::{resolve_config, ConfigOverrides};
use site_mirror::crawler::crawl;
use site_mirror::output::print_statistics;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Site-Mirror: a single-domain web crawler
///
/// Site-Mirror walks every page under a base host/path and mirrors it onto
/// local storage, rewriting files only when their content changed. A crawl
/// can be interrupted and resumed from the state files in the save directory.
#[derive(Parser, Debug)]
#[command(name = "site-mirror")]
#[command(version)]
#[command(about = "Mirror every page under a base host/path", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Base host and path prefix that bounds the crawl
    #[arg(short, long, value_name = "HOST/PATH")]
    base: Option<String>,

    /// Directory receiving the mirror and the state files
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// URL the crawl starts from
    #[arg(short, long, value_name = "URL")]
    frontier: Option<String>,

    /// Completed visits between state snapshots
    #[arg(short, long, value_name = "N")]
    interval: Option<u32>,

    /// Minimum delay between visits, in seconds
    #[arg(short, long, value_name = "SECS")]
    min: Option<u64>,

    /// Maximum delay between visits, in seconds
    #[arg(short = 'x', long, value_name = "SECS")]
    max: Option<u64>,

    /// Fetch timeout, in seconds
    #[arg(short = 'w', long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Resume from the state files in the save directory
    #[arg(short, long)]
    resume: bool,

    /// Strip scripts, styles and comments from pages before saving
    #[arg(short, long)]
    clean: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base: self.base.clone(),
            frontier: self.frontier.clone(),
            save_dir: self.dir.clone(),
            save_interval: self.interval,
            min_wait: self.min,
            max_wait: self.max,
            timeout: self.timeout,
            resume: self.resume,
            clean: self.clean,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    if let Some(path) = &cli.config {
        tracing::info!("Loading configuration from: {}", path.display());
    }

    let config = resolve_config(cli.config.as_deref(), cli.overrides())
        .context("Invalid configuration")?;
    tracing::trace!("Resolved configuration: {:?}", config);

    if config.resume {
        tracing::info!(
            "Resuming from state files in {}",
            config.save_dir.display()
        );
    }

    let stats = crawl(config).await.context("Crawl failed")?;

    if !cli.quiet {
        print_statistics(&stats);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("site_mirror=info,warn"),
            1 => EnvFilter::new("site_mirror=debug,info"),
            2 => EnvFilter::new("site_mirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
