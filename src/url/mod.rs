//! URL handling module for Site-Mirror
//!
//! This module provides URL normalization, the crawl boundary check and the
//! hashed URL keys used by the visited set.

mod domain;
mod hash;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, in_scope, BaseDomain};
pub use hash::UrlHash;
pub use normalize::{is_directory_style, normalize_url};

/// Normalizes a discovered link and checks it against the crawl boundary
///
/// Returns the canonical URL when the link is both well-formed and inside
/// `base`, or `None` otherwise.
///
/// # Examples
///
/// ```
/// use site_mirror::url::{admit_link, BaseDomain};
///
/// let base = BaseDomain::parse("site.test/").unwrap();
/// let admitted = admit_link("https://site.test/a", &base).unwrap();
/// assert_eq!(admitted.as_str(), "https://site.test/a/");
/// assert!(admit_link("https://other.test/x", &base).is_none());
/// ```
pub fn admit_link(link: &str, base: &BaseDomain) -> Option<::url::Url> {
    match normalize_url(link) {
        Ok(normalized) if base.contains(&normalized) => Some(normalized),
        Ok(normalized) => {
            tracing::trace!("Out of scope: {}", normalized);
            None
        }
        Err(e) => {
            tracing::debug!("Failed to normalize URL {}: {}", link, e);
            None
        }
    }
}
