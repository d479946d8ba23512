//! Output module for reporting crawl results
//!
//! The mirror itself is written by the storage layer; this module only keeps
//! and prints the run's counters.

pub mod stats;

pub use stats::{print_statistics, CrawlStatistics};
