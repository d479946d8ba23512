//! Storage module for persisting crawl data
//!
//! This module handles everything the crawler writes to disk:
//! - The page mirror, with checksum-gated writes
//! - Snapshots of the frontier and visited set for resumption

mod content;
mod error;
mod snapshot;

pub use content::{checksum, file_checksum, ContentStore, DEFAULT_INDEX_FILE};
pub use error::{StorageError, StorageResult};
pub use snapshot::{SnapshotStore, FRONTIER_FILE_NAME, VISITED_FILE_NAME};

use std::fmt;
use std::path::PathBuf;

/// What a save did to the file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SaveOutcome {
    /// No file existed; it was created
    Created,
    /// The file existed with different content and was overwritten
    Updated,
    /// The file already held identical content; nothing was written
    Unchanged,
}

impl SaveOutcome {
    /// Returns true if bytes were written
    pub fn wrote(&self) -> bool {
        matches!(self, Self::Created | Self::Updated)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Unchanged => "unchanged",
        }
    }
}

impl fmt::Display for SaveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page materialized on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPage {
    /// Where the page lives
    pub path: PathBuf,
    /// Hex SHA-256 of the bytes on disk
    pub checksum: String,
    /// What this save did
    pub outcome: SaveOutcome,
}
