//! Persistence of the frontier and visited set between runs
//!
//! Two plain-text files live in the save directory:
//!
//! - `resume.dat`: one canonical URL per line, the pending frontier
//! - `visited.dat`: one hex URL hash per line, the visited set
//!
//! Each save rewrites both files completely. A file is first written to a
//! sibling temporary file and then renamed over the old one, so an
//! interruption never leaves a half-written state file behind.

use crate::state::FrontierSnapshot;
use crate::storage::error::{StorageError, StorageResult};
use crate::url::{normalize_url, UrlHash};
use std::fs;
use std::path::{Path, PathBuf};

/// File holding the pending frontier
pub const FRONTIER_FILE_NAME: &str = "resume.dat";

/// File holding the visited URL hashes
pub const VISITED_FILE_NAME: &str = "visited.dat";

/// Reads and writes frontier snapshots in a directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Creates a snapshot store for `dir`; nothing is touched until `save`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the frontier file
    pub fn frontier_path(&self) -> PathBuf {
        self.dir.join(FRONTIER_FILE_NAME)
    }

    /// Path of the visited file
    pub fn visited_path(&self) -> PathBuf {
        self.dir.join(VISITED_FILE_NAME)
    }

    /// Writes both sets to disk
    ///
    /// Lines are sorted so consecutive snapshots diff cleanly.
    pub fn save(&self, snapshot: &FrontierSnapshot) -> StorageResult<()> {
        fs::create_dir_all(&self.dir).map_err(StorageError::io(&self.dir))?;

        let mut pending: Vec<&str> = snapshot.pending.iter().map(|u| u.as_str()).collect();
        pending.sort_unstable();
        write_replacing(&self.frontier_path(), &join_lines(pending))?;

        let mut visited: Vec<String> = snapshot.visited.iter().map(UrlHash::to_hex).collect();
        visited.sort_unstable();
        write_replacing(&self.visited_path(), &join_lines(visited))?;

        tracing::debug!(
            "Saved {} pending and {} visited URLs to {}",
            snapshot.pending.len(),
            snapshot.visited.len(),
            self.dir.display()
        );

        Ok(())
    }

    /// Loads both sets from disk
    ///
    /// Missing files load as empty sets. Every frontier line is normalized
    /// again; visited lines are read as hashes, or as URLs to be hashed.
    /// Lines that are neither are skipped with a warning.
    pub fn load(&self) -> StorageResult<FrontierSnapshot> {
        let pending = read_lines(&self.frontier_path())?
            .into_iter()
            .filter_map(|line| match normalize_url(&line) {
                Ok(url) => Some(url),
                Err(e) => {
                    tracing::warn!("Skipping unreadable frontier entry '{}': {}", line, e);
                    None
                }
            })
            .collect();

        let visited = read_lines(&self.visited_path())?
            .into_iter()
            .filter_map(|line| {
                if let Ok(hash) = UrlHash::from_hex(&line) {
                    return Some(hash);
                }
                match normalize_url(&line) {
                    Ok(url) => Some(UrlHash::of(&url)),
                    Err(e) => {
                        tracing::warn!("Skipping unreadable visited entry '{}': {}", line, e);
                        None
                    }
                }
            })
            .collect();

        Ok(FrontierSnapshot { pending, visited })
    }
}

fn join_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for line in lines {
        out.push_str(line.as_ref());
        out.push('\n');
    }
    out
}

fn read_lines(path: &Path) -> StorageResult<Vec<String>> {
    if !path.is_file() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path).map_err(StorageError::io(path))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn write_replacing(path: &Path, content: &str) -> StorageResult<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content).map_err(StorageError::io(&tmp))?;
    fs::rename(&tmp, path).map_err(StorageError::io(path))
}
