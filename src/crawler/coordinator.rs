//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Bootstrapping the frontier from the seed or a previous run
//! - Gating every fetch through the visited set
//! - Saving pages and extracting links from textual content
//! - Periodic snapshots of the frontier and visited set

use crate::config::Config;
use crate::crawler::fetcher::{FetchResponse, Fetcher, HttpFetcher};
use crate::crawler::parser::extract_links;
use crate::crawler::sanitize::clean_html;
use crate::crawler::scheduler::Throttle;
use crate::output::CrawlStatistics;
use crate::state::CrawlFrontier;
use crate::storage::{ContentStore, SaveOutcome, SnapshotStore};
use crate::url::{admit_link, normalize_url, BaseDomain};
use crate::CrawlError;
use std::fmt;
use std::time::Instant;
use url::Url;

/// Visits between progress log lines
const PROGRESS_INTERVAL: u64 = 10;

/// Lifecycle of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    /// Loading the frontier from the seed or a previous run
    Bootstrapping,
    /// Processing URLs until the frontier is empty
    Crawling,
    /// Writing the final snapshot
    Draining,
    /// Done
    Finished,
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bootstrapping => "bootstrapping",
            Self::Crawling => "crawling",
            Self::Draining => "draining",
            Self::Finished => "finished",
        };
        f.write_str(name)
    }
}

/// What happened to a single URL taken from the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitOutcome {
    /// Already in the visited set; nothing was fetched
    AlreadyVisited,
    /// The fetch failed before a response arrived
    FetchFailed,
    /// The fetch redirected to a URL that was already visited
    RedirectedToVisited,
    /// The fetch redirected outside the base domain
    OutOfScope,
    /// The server answered with a status other than 200
    HttpStatus(u16),
    /// The page is on disk; `links_queued` new URLs entered the frontier
    Saved {
        outcome: SaveOutcome,
        links_queued: usize,
    },
    /// Saving failed, links were still followed
    SaveFailed { links_queued: usize },
}

impl VisitOutcome {
    /// Returns true if the visit issued a request
    ///
    /// Only these visits are throttled and counted towards the snapshot interval.
    pub fn reached_fetch(&self) -> bool {
        !matches!(self, Self::AlreadyVisited)
    }
}

/// Main crawler coordinator structure
///
/// Owns the frontier and visited set for the whole run; the crawl is strictly
/// sequential so no locking is involved.
pub struct Coordinator<F: Fetcher> {
    config: Config,
    base: BaseDomain,
    frontier: CrawlFrontier,
    store: ContentStore,
    snapshots: SnapshotStore,
    fetcher: F,
    throttle: Throttle,
    stats: CrawlStatistics,
    phase: CrawlPhase,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(CrawlError)` - Invalid base or the HTTP client could not be built
    pub fn from_config(config: Config) -> Result<Self, CrawlError> {
        let fetcher = HttpFetcher::new(&config)?;
        Self::new(config, fetcher)
    }
}

impl<F: Fetcher> Coordinator<F> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `fetcher` - Source of page content
    pub fn new(config: Config, fetcher: F) -> Result<Self, CrawlError> {
        let base = BaseDomain::parse(&config.base)?;
        let store = ContentStore::new(&config.save_dir, config.index_file_name.clone());
        let snapshots = SnapshotStore::new(&config.save_dir);
        let throttle = Throttle::from_config(&config);

        Ok(Self {
            config,
            base,
            frontier: CrawlFrontier::new(),
            store,
            snapshots,
            fetcher,
            throttle,
            stats: CrawlStatistics::new(),
            phase: CrawlPhase::Bootstrapping,
        })
    }

    /// The frontier and visited set
    pub fn frontier(&self) -> &CrawlFrontier {
        &self.frontier
    }

    /// Loads the initial frontier
    ///
    /// With `resume` set, both sets are restored from the save directory. One
    /// restored URL is checked against the base domain: state left behind by a
    /// crawl of another site is rejected with `CrawlError::ForeignResume`. An
    /// empty restored frontier falls back to the seed.
    pub fn bootstrap(&mut self) -> Result<(), CrawlError> {
        self.enter(CrawlPhase::Bootstrapping);

        if self.config.resume {
            let snapshot = self.snapshots.load()?;
            if snapshot.is_empty() {
                tracing::info!("No saved state in {}", self.config.save_dir.display());
            } else {
                tracing::info!(
                    "Loaded {} pending and {} visited URLs from {}",
                    snapshot.pending.len(),
                    snapshot.visited.len(),
                    self.config.save_dir.display()
                );
            }
            self.frontier.restore(snapshot);

            match self.frontier.pop_next() {
                Some(sample) => {
                    if !self.base.contains(&sample) {
                        return Err(CrawlError::ForeignResume {
                            url: sample.to_string(),
                            base: self.base.to_string(),
                        });
                    }
                    self.frontier.submit_candidate(&sample);
                    return Ok(());
                }
                None => {
                    tracing::warn!("Could not load frontier URLs from disk; starting from the seed")
                }
            }
        }

        let seed = normalize_url(&self.config.frontier)?;
        if !self.frontier.submit_candidate(&seed) {
            tracing::info!("Seed {} was already visited", seed);
        }

        Ok(())
    }

    /// Runs the main crawl loop until the frontier is empty
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStatistics)` - Crawl completed
    /// * `Err(CrawlError)` - Bootstrapping or a snapshot write failed
    pub async fn run(&mut self) -> Result<CrawlStatistics, CrawlError> {
        tracing::info!(
            "Crawler has started! Frontier: {}, base: {}",
            self.config.frontier,
            self.base
        );

        self.bootstrap()?;
        self.enter(CrawlPhase::Crawling);

        let start_time = Instant::now();
        let save_interval = u64::from(self.config.save_interval.max(1));

        while let Some(url) = self.frontier.pop_next() {
            tracing::debug!(
                "Processing {} ({} pending)",
                url,
                self.frontier.pending_len()
            );

            let outcome = self.process_url(&url).await;
            self.stats.record(&outcome);

            if !outcome.reached_fetch() {
                continue;
            }

            if self.stats.visits % save_interval == 0 {
                self.save_snapshot()?;
            }

            if self.stats.visits % PROGRESS_INTERVAL == 0 {
                let rate = self.stats.visits as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {} visits, {} pending, {} visited, {:.2} visits/sec",
                    self.stats.visits,
                    self.frontier.pending_len(),
                    self.frontier.visited_len(),
                    rate
                );
            }

            if !self.frontier.is_empty() {
                self.throttle.pause().await;
            }
        }

        self.enter(CrawlPhase::Draining);
        self.save_snapshot()?;

        self.stats.elapsed = start_time.elapsed();
        self.stats.pending = self.frontier.pending_len() as u64;
        self.stats.visited = self.frontier.visited_len() as u64;
        self.enter(CrawlPhase::Finished);

        tracing::info!(
            "Crawl completed: {} visits in {:?}, {} links queued",
            self.stats.visits,
            self.stats.elapsed,
            self.stats.links_queued
        );

        Ok(self.stats.clone())
    }

    /// Processes a single URL
    ///
    /// This method:
    /// 1. Marks the URL visited, skipping it if it already was
    /// 2. Fetches it, following redirects
    /// 3. Re-checks the final URL against the visited set and the base
    /// 4. Saves 200 responses
    /// 5. Queues in-scope links found in textual content
    ///
    /// Failures are logged and reported through the returned outcome; they
    /// never stop the crawl.
    pub async fn process_url(&mut self, url: &Url) -> VisitOutcome {
        if !self.frontier.mark_visited(url) {
            tracing::debug!("Already visited: {}", url);
            return VisitOutcome::AlreadyVisited;
        }

        let response = match self.fetcher.fetch(url).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Could not retrieve {}: {}", url, e);
                return VisitOutcome::FetchFailed;
            }
        };

        let final_url = match self.resolve_final_url(url, &response) {
            Ok(final_url) => final_url,
            Err(outcome) => return outcome,
        };

        if !response.is_success() {
            tracing::warn!(
                "Received HTTP status code {} for {}",
                response.status_code,
                final_url
            );
            return VisitOutcome::HttpStatus(response.status_code);
        }

        let is_text = response.is_text();
        let cleaned = if self.config.clean && is_text {
            Some(clean_html(&response.body))
        } else {
            None
        };

        let saved = match self
            .store
            .save(&final_url, &response.body, cleaned.as_deref(), is_text)
        {
            Ok(page) => {
                if page.outcome.wrote() {
                    tracing::info!("Saved {} ({})", final_url, page.outcome);
                }
                Some(page.outcome)
            }
            Err(e) => {
                tracing::warn!("Could not save {}: {}", final_url, e);
                None
            }
        };

        let links_queued = if is_text {
            self.queue_links(&response.body, &final_url)
        } else {
            0
        };

        match saved {
            Some(outcome) => VisitOutcome::Saved {
                outcome,
                links_queued,
            },
            None => VisitOutcome::SaveFailed { links_queued },
        }
    }

    /// Canonical form of the URL the fetch ended on
    ///
    /// A redirect target goes through the visited gate and the base check
    /// like any popped URL.
    fn resolve_final_url(&mut self, url: &Url, response: &FetchResponse) -> Result<Url, VisitOutcome> {
        if response.final_url == *url {
            return Ok(url.clone());
        }

        let final_url = match normalize_url(response.final_url.as_str()) {
            Ok(final_url) => final_url,
            Err(e) => {
                tracing::warn!(
                    "{} redirected to unusable URL {}: {}",
                    url,
                    response.final_url,
                    e
                );
                return Err(VisitOutcome::OutOfScope);
            }
        };

        if final_url == *url {
            return Ok(final_url);
        }

        tracing::debug!("{} redirected to {}", url, final_url);

        if !self.frontier.mark_visited(&final_url) {
            tracing::debug!("Redirect target already visited: {}", final_url);
            return Err(VisitOutcome::RedirectedToVisited);
        }

        if !self.base.contains(&final_url) {
            tracing::info!("{} redirected outside {}: {}", url, self.base, final_url);
            return Err(VisitOutcome::OutOfScope);
        }

        Ok(final_url)
    }

    /// Extracts links from a page and submits the in-scope ones
    ///
    /// # Returns
    ///
    /// The number of URLs newly added to the frontier
    fn queue_links(&mut self, body: &[u8], page_url: &Url) -> usize {
        let links = extract_links(body, page_url);

        let mut queued = 0;
        for link in &links {
            if let Some(candidate) = admit_link(link, &self.base) {
                if self.frontier.submit_candidate(&candidate) {
                    queued += 1;
                }
            }
        }

        tracing::debug!(
            "Found {} links on {}, {} newly queued",
            links.len(),
            page_url,
            queued
        );

        queued
    }

    fn enter(&mut self, phase: CrawlPhase) {
        tracing::debug!("Crawl phase: {} -> {}", self.phase, phase);
        self.phase = phase;
    }

    /// Persists both sets to the save directory
    fn save_snapshot(&mut self) -> Result<(), CrawlError> {
        self.snapshots.save(&self.frontier.snapshot())?;
        self.stats.snapshots += 1;
        tracing::debug!(
            "Saved snapshot: {} pending, {} visited",
            self.frontier.pending_len(),
            self.frontier.visited_len()
        );
        Ok(())
    }
}

/// Runs the main crawl operation over HTTP
///
/// # Example
///
/// ```no_run
/// use site_mirror::config::load_config;
/// use site_mirror::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("mirror.toml"))?;
/// let stats = run_crawl(config).await?;
/// println!("{} pages visited", stats.visits);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlStatistics, CrawlError> {
    let mut coordinator = Coordinator::from_config(config)?;
    coordinator.run().await
}
