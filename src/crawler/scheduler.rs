//! Politeness throttle between visits
//!
//! The crawl is strictly sequential; the only scheduling decision left is how
//! long to wait before the next fetch. Each wait is drawn uniformly from the
//! configured `[min_wait, max_wait]` window in whole seconds.

use crate::config::Config;
use rand::Rng;
use std::time::Duration;

/// Randomized delay inserted between visits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    min_secs: u64,
    max_secs: u64,
}

impl Throttle {
    /// Creates a throttle; an inverted window is swapped
    pub fn new(min_secs: u64, max_secs: u64) -> Self {
        Self {
            min_secs: min_secs.min(max_secs),
            max_secs: min_secs.max(max_secs),
        }
    }

    /// Creates a throttle from the configured wait window
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.min_wait, config.max_wait)
    }

    /// Draws the next delay
    pub fn next_delay(&self) -> Duration {
        if self.min_secs == self.max_secs {
            return Duration::from_secs(self.min_secs);
        }
        let secs = rand::thread_rng().gen_range(self.min_secs..=self.max_secs);
        Duration::from_secs(secs)
    }

    /// Sleeps for a freshly drawn delay
    pub async fn pause(&self) {
        let wait = self.next_delay();
        if wait.is_zero() {
            return;
        }
        tracing::debug!("Sleeping for {} seconds", wait.as_secs());
        tokio::time::sleep(wait).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_within_window() {
        let throttle = Throttle::new(2, 5);
        for _ in 0..200 {
            let delay = throttle.next_delay();
            assert!(delay >= Duration::from_secs(2));
            assert!(delay <= Duration::from_secs(5));
        }
    }

    #[test]
    fn test_fixed_window() {
        let throttle = Throttle::new(3, 3);
        assert_eq!(throttle.next_delay(), Duration::from_secs(3));
    }

    #[test]
    fn test_inverted_window_is_swapped() {
        assert_eq!(Throttle::new(9, 1), Throttle::new(1, 9));
    }

    #[test]
    fn test_from_config() {
        let config = Config {
            min_wait: 1,
            max_wait: 4,
            ..Config::default()
        };
        assert_eq!(Throttle::from_config(&config), Throttle::new(1, 4));
    }

    #[tokio::test]
    async fn test_zero_pause_returns_immediately() {
        let start = std::time::Instant::now();
        Throttle::new(0, 0).pause().await;
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
