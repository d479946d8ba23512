//! Run statistics
//!
//! Counters accumulated by the crawl driver, one per visit outcome, and a
//! plain-text report printed when the run ends.

use crate::crawler::VisitOutcome;
use crate::storage::SaveOutcome;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    /// Visits that reached the fetch stage
    pub visits: u64,

    /// URLs skipped because they were already visited
    pub skipped: u64,

    /// Fetches that failed at the transport level
    pub fetch_failures: u64,

    /// Responses with a status other than 200
    pub http_errors: u64,

    /// Redirects that left the base domain
    pub out_of_scope: u64,

    /// Pages written for the first time
    pub pages_created: u64,

    /// Pages rewritten because their content changed
    pub pages_updated: u64,

    /// Pages whose content matched the file on disk
    pub pages_unchanged: u64,

    /// Pages that could not be written
    pub save_failures: u64,

    /// New URLs added to the frontier
    pub links_queued: u64,

    /// Snapshots of the frontier and visited set written
    pub snapshots: u64,

    /// URLs still pending when the run ended
    pub pending: u64,

    /// Size of the visited set when the run ended
    pub visited: u64,

    /// Wall-clock duration of the crawl loop
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Creates zeroed statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one processed URL
    pub fn record(&mut self, outcome: &VisitOutcome) {
        if outcome.reached_fetch() {
            self.visits += 1;
        }

        match outcome {
            VisitOutcome::AlreadyVisited | VisitOutcome::RedirectedToVisited => self.skipped += 1,
            VisitOutcome::FetchFailed => self.fetch_failures += 1,
            VisitOutcome::OutOfScope => self.out_of_scope += 1,
            VisitOutcome::HttpStatus(_) => self.http_errors += 1,
            VisitOutcome::Saved {
                outcome,
                links_queued,
            } => {
                match outcome {
                    SaveOutcome::Created => self.pages_created += 1,
                    SaveOutcome::Updated => self.pages_updated += 1,
                    SaveOutcome::Unchanged => self.pages_unchanged += 1,
                }
                self.links_queued += *links_queued as u64;
            }
            VisitOutcome::SaveFailed { links_queued } => {
                self.save_failures += 1;
                self.links_queued += *links_queued as u64;
            }
        }
    }

    /// Pages present on disk after their visit, written or not
    pub fn pages_saved(&self) -> u64 {
        self.pages_created + self.pages_updated + self.pages_unchanged
    }

    /// Visits per minute over the crawl loop
    pub fn visits_per_minute(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.visits as f64 * 60.0 / secs
        } else {
            0.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Visits: {}", stats.visits);
    println!("  Skipped (already visited): {}", stats.skipped);
    println!("  Links queued: {}", stats.links_queued);
    println!(
        "  Elapsed: {:.1}s ({:.1} visits/min)",
        stats.elapsed.as_secs_f64(),
        stats.visits_per_minute()
    );
    println!();

    println!("Pages ({} saved):", stats.pages_saved());
    println!("  Created: {}", stats.pages_created);
    println!("  Updated: {}", stats.pages_updated);
    println!("  Unchanged: {}", stats.pages_unchanged);
    println!();

    let failures =
        stats.fetch_failures + stats.http_errors + stats.out_of_scope + stats.save_failures;
    if failures > 0 {
        println!("Failures:");
        println!("  Fetch errors: {}", stats.fetch_failures);
        println!("  Non-200 responses: {}", stats.http_errors);
        println!("  Redirected out of scope: {}", stats.out_of_scope);
        println!("  Save errors: {}", stats.save_failures);
        println!();
    }

    println!("State:");
    println!("  Visited set: {}", stats.visited);
    println!("  Pending: {}", stats.pending);
    println!("  Snapshots written: {}", stats.snapshots);
}
