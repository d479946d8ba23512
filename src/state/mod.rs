//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlFrontier`: owns the frontier (pending work) and the visited set
//! - `FrontierSnapshot`: read-only export of both sets for persistence
//! - `UrlState`: where a URL sits in the crawl (unseen, frontier, visited)

mod frontier;
mod url_state;

// Re-export main types
pub use frontier::{CrawlFrontier, FrontierSnapshot};
pub use url_state::UrlState;
