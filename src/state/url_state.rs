/// URL state definitions for tracking crawl progress
///
/// A URL moves towards `Visited`, usually through `Frontier`, and never
/// returns to the frontier once visited.
use std::fmt;

/// Represents where a canonical URL currently sits in the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlState {
    /// Never submitted and never visited
    Unseen,

    /// Discovered and waiting in the frontier
    Frontier,

    /// Already processed; will not be fetched again this run
    Visited,
}

impl UrlState {
    /// Returns the display name of the state
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Unseen => "Unseen",
            Self::Frontier => "Frontier",
            Self::Visited => "Visited",
        }
    }
}

impl fmt::Display for UrlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
