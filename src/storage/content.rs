//! On-disk mirror of crawled pages
//!
//! Every URL maps to exactly one file under the save directory:
//! `<root>/<host>[_<port>]/<path segments>/<file name>`. A page is written
//! when it is new or when its checksum differs from the file already on disk.

use crate::storage::error::{StorageError, StorageResult};
use crate::storage::{SaveOutcome, StoredPage};
use crate::url::is_directory_style;
use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use url::Url;

/// File name used for directory-style textual pages
pub const DEFAULT_INDEX_FILE: &str = "index.html";

/// Block size used when hashing existing files
const CHECKSUM_BLOCK_SIZE: usize = 1 << 20;

/// Writes page content under a root directory, skipping unchanged pages
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
    index_file_name: String,
}

impl ContentStore {
    /// Creates a content store rooted at `root`
    ///
    /// # Arguments
    ///
    /// * `root` - Directory that receives one sub-directory per host
    /// * `index_file_name` - File name for directory-style textual pages
    pub fn new(root: impl Into<PathBuf>, index_file_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            index_file_name: index_file_name.into(),
        }
    }

    /// Computes where the content for `url` lives on disk
    ///
    /// # Path Rules
    ///
    /// | URL | textual | file |
    /// |-----|---------|------|
    /// | `/docs/guide.html` | any | `docs/guide.html` |
    /// | `/docs/` | yes | `docs/index.html` |
    /// | `/docs/` | no | `docs` |
    /// | `/` | any | `index.html` |
    ///
    /// # Errors
    ///
    /// `StorageError::InvalidPath` if the URL has no host or a path segment
    /// could escape the host directory.
    pub fn save_path(&self, url: &Url, is_text: bool) -> StorageResult<PathBuf> {
        let invalid = |reason: &str| StorageError::InvalidPath {
            url: url.to_string(),
            reason: reason.to_string(),
        };

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid("missing host"))?;

        let host_dir = match url.port() {
            Some(port) => format!("{}_{}", host, port),
            None => host.to_string(),
        };

        let segments: Vec<&str> = url.path().split('/').filter(|s| !s.is_empty()).collect();
        for segment in &segments {
            if *segment == "." || *segment == ".." {
                return Err(invalid("dot segment in path"));
            }
            if segment.contains('\\') || segment.contains('\0') {
                return Err(invalid("illegal character in path segment"));
            }
        }

        let index = self.index_file_name.as_str();
        let (dirs, file_name): (&[&str], &str) = match segments.split_last() {
            Some(_) if is_text && is_directory_style(url) => (segments.as_slice(), index),
            Some((last, parents)) => (parents, *last),
            None => (segments.as_slice(), index),
        };

        let mut path = self.root.join(host_dir);
        for dir in dirs {
            path.push(dir);
        }
        path.push(file_name);

        Ok(path)
    }

    /// Saves page content, writing only when it is new or has changed
    ///
    /// The payload is `cleaned` when the content is textual and cleaned bytes
    /// were supplied, otherwise `raw`. The comparison is always between the
    /// checksum of the file on disk and the checksum of that exact payload.
    ///
    /// # Returns
    ///
    /// * `Ok(StoredPage)` - Where the page lives and whether it was written
    /// * `Err(StorageError)` - Path could not be derived or the write failed
    pub fn save(
        &self,
        url: &Url,
        raw: &[u8],
        cleaned: Option<&[u8]>,
        is_text: bool,
    ) -> StorageResult<StoredPage> {
        let path = self.save_path(url, is_text)?;

        let payload = match cleaned {
            Some(cleaned) if is_text => cleaned,
            _ => raw,
        };
        let checksum = checksum(payload);

        let outcome = if path.is_file() {
            let local_checksum = file_checksum(&path)?;
            if local_checksum == checksum {
                SaveOutcome::Unchanged
            } else {
                fs::write(&path, payload).map_err(StorageError::io(&path))?;
                SaveOutcome::Updated
            }
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(StorageError::io(parent))?;
            }
            fs::write(&path, payload).map_err(StorageError::io(&path))?;
            SaveOutcome::Created
        };

        tracing::debug!("{} -> {} ({})", url, path.display(), outcome);

        Ok(StoredPage {
            path,
            checksum,
            outcome,
        })
    }
}

/// SHA-256 of a byte slice, hex encoded
pub fn checksum(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// SHA-256 of a file's contents, hex encoded
pub fn file_checksum(path: &Path) -> StorageResult<String> {
    let mut file = File::open(path).map_err(StorageError::io(path))?;
    let mut hasher = Sha256::new();
    let mut block = vec![0u8; CHECKSUM_BLOCK_SIZE];

    loop {
        let read = file.read(&mut block).map_err(StorageError::io(path))?;
        if read == 0 {
            break;
        }
        hasher.update(&block[..read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
