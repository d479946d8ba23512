//! The crawl frontier and visited set
//!
//! `CrawlFrontier` exclusively owns the two sets that drive a crawl. The
//! driver only touches them through the operations below, which keep one
//! invariant: no URL whose hash is in the visited set is ever in the frontier
//! after a submission.

use crate::state::UrlState;
use crate::url::UrlHash;
use std::collections::{HashMap, HashSet};
use url::Url;

/// Read-only export of the frontier and visited set for persistence
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontierSnapshot {
    /// Canonical URLs waiting to be visited
    pub pending: Vec<Url>,

    /// Hashes of URLs already visited
    pub visited: Vec<UrlHash>,
}

impl FrontierSnapshot {
    /// Returns true if both sets are empty
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.visited.is_empty()
    }
}

/// Work queue plus visited set for a single crawl
///
/// Pop order is deliberately unspecified: `pop_next` yields an arbitrary
/// pending URL and successive runs may visit pages in different orders.
///
/// Both sets are keyed by `UrlHash`, so URLs that differ only in letter case
/// share one identity in the frontier as well as in the visited set.
#[derive(Debug, Default)]
pub struct CrawlFrontier {
    visited: HashSet<UrlHash>,
    pending: HashMap<UrlHash, Url>,
}

impl CrawlFrontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a visit attempt for `url`
    ///
    /// This is the single admission gate for fetching.
    ///
    /// # Returns
    ///
    /// * `true` - First time this URL is seen as visited; the caller should proceed
    /// * `false` - Already visited; the caller must skip it
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        let key = UrlHash::of(url);
        let inserted = self.visited.insert(key);
        if inserted {
            // A URL reaching the gate without being popped (e.g. a redirect target)
            // must not linger in the frontier.
            self.pending.remove(&key);
        }
        inserted
    }

    /// Adds a discovered URL to the frontier unless it was already visited
    ///
    /// Submitting the same URL twice is a no-op.
    ///
    /// # Returns
    ///
    /// `true` if the URL was newly queued
    pub fn submit_candidate(&mut self, url: &Url) -> bool {
        if self.state_of(url) != UrlState::Unseen {
            return false;
        }
        self.pending.insert(UrlHash::of(url), url.clone());
        true
    }

    /// Removes and returns an arbitrary pending URL
    pub fn pop_next(&mut self) -> Option<Url> {
        let key = *self.pending.keys().next()?;
        self.pending.remove(&key)
    }

    /// Returns true if `url` has been visited
    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(&UrlHash::of(url))
    }

    /// Reports where `url` sits in the crawl
    pub fn state_of(&self, url: &Url) -> UrlState {
        if self.is_visited(url) {
            UrlState::Visited
        } else if self.pending.contains_key(&UrlHash::of(url)) {
            UrlState::Frontier
        } else {
            UrlState::Unseen
        }
    }

    /// Number of URLs waiting in the frontier
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of visited URL hashes
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    /// Returns true when there is no more pending work
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterates over the pending URLs without removing them
    pub fn pending(&self) -> impl Iterator<Item = &Url> {
        self.pending.values()
    }

    /// Exports both sets for persistence
    pub fn snapshot(&self) -> FrontierSnapshot {
        FrontierSnapshot {
            pending: self.pending.values().cloned().collect(),
            visited: self.visited.iter().copied().collect(),
        }
    }

    /// Bulk-loads both sets, typically from a previous run's snapshot
    ///
    /// Visited hashes are loaded first so that pending entries that were
    /// already visited are dropped rather than re-queued.
    pub fn restore(&mut self, snapshot: FrontierSnapshot) {
        self.visited.extend(snapshot.visited);

        for url in snapshot.pending {
            self.submit_candidate(&url);
        }
    }
}
