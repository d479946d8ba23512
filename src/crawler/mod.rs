//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - HTML parsing and link extraction
//! - Optional HTML cleaning before pages are saved
//! - The politeness throttle
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;
mod sanitize;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator, CrawlPhase, VisitOutcome};
pub use fetcher::{build_http_client, FetchError, FetchResponse, Fetcher, HttpFetcher, MAX_REDIRECTS};
pub use parser::{extract_links, parse_html, ParsedPage};
pub use sanitize::clean_html;
pub use scheduler::Throttle;

use crate::config::Config;
use crate::output::CrawlStatistics;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Seed the frontier, or restore it when resuming
/// 3. Fetch pages until the frontier is empty
/// 4. Save pages whose content changed and follow their links
/// 5. Snapshot the frontier and visited set along the way
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlStatistics)` - Crawl completed successfully
/// * `Err(CrawlError)` - Crawl failed
pub async fn crawl(config: Config) -> Result<CrawlStatistics, CrawlError> {
    run_crawl(config).await
}
