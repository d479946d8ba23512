use crate::UrlError;
use url::Url;

/// Normalizes a URL according to Site-Mirror's canonicalization rules
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything that is not http:// or https://
/// 3. Reject URLs without a host
/// 4. Drop user info, query string and fragment
/// 5. Normalize path:
///    - Collapse repeated slashes
///    - Dot segments are resolved by the parser
///    - If the last segment has no `.`, the path is a directory
///      reference and gets a trailing slash (empty path becomes `/`)
///
/// The result is always `scheme://host[:port]/path` and normalizing it again
/// yields the same URL.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Canonical URL
/// * `Err(UrlError)` - Failed to parse the URL or it is out of scope
///
/// # Examples
///
/// ```
/// use site_mirror::url::normalize_url;
///
/// let url = normalize_url("https://EXAMPLE.COM//docs?page=2#intro").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/docs/");
///
/// let url = normalize_url("https://example.com/files/report.pdf").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/files/report.pdf");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlError::MissingDomain),
    }

    url.set_username("")
        .map_err(|_| UrlError::Malformed(format!("Cannot strip user info from {}", url_str)))?;
    url.set_password(None)
        .map_err(|_| UrlError::Malformed(format!("Cannot strip password from {}", url_str)))?;
    url.set_query(None);
    url.set_fragment(None);

    let normalized_path = normalize_path(url.path());
    url.set_path(&normalized_path);

    Ok(url)
}

/// Returns true when the canonical URL names a directory-style resource
pub fn is_directory_style(url: &Url) -> bool {
    url.path().ends_with('/')
}

/// Collapses repeated slashes and marks extension-less paths as directories
fn normalize_path(path: &str) -> String {
    let mut collapsed = String::with_capacity(path.len() + 1);
    let mut previous_slash = false;

    for c in path.chars() {
        if c == '/' {
            if previous_slash {
                continue;
            }
            previous_slash = true;
        } else {
            previous_slash = false;
        }
        collapsed.push(c);
    }

    if !collapsed.starts_with('/') {
        collapsed.insert(0, '/');
    }

    let last_segment = collapsed.rsplit('/').next().unwrap_or("");
    if !last_segment.contains('.') && !collapsed.ends_with('/') {
        collapsed.push('/');
    }

    collapsed
}
