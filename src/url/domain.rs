use crate::UrlError;
use std::fmt;
use url::Url;

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host, it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_mirror::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// The crawl boundary: a host plus a path prefix
///
/// Parsed once per run from the configured base string, e.g.
/// `example.com/blog` or `https://example.com/blog/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDomain {
    host: String,
    port: Option<u16>,
    path: String,
    raw: String,
}

impl BaseDomain {
    /// Parses a base string the same way a URL is parsed
    ///
    /// A missing scheme is treated as `http://`; the scheme itself plays no
    /// part in scope checks.
    ///
    /// # Examples
    ///
    /// ```
    /// use site_mirror::url::BaseDomain;
    ///
    /// let base = BaseDomain::parse("example.com/blog").unwrap();
    /// assert_eq!(base.host(), "example.com");
    /// assert_eq!(base.path(), "/blog");
    /// ```
    pub fn parse(base: &str) -> Result<Self, UrlError> {
        let trimmed = base.trim();
        let with_scheme = if trimmed.contains("://") {
            trimmed.to_string()
        } else {
            format!("http://{}", trimmed)
        };

        let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;
        let host = extract_domain(&url)
            .filter(|h| !h.is_empty())
            .ok_or(UrlError::MissingDomain)?;

        Ok(Self {
            host,
            port: url.port(),
            path: url.path().to_string(),
            raw: trimmed.to_string(),
        })
    }

    /// The lower-cased base host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The explicit non-default port of the base, if any
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// The base path prefix (at least `/`)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Checks whether a candidate URL falls inside this base
    ///
    /// A candidate is in scope when its scheme is http/https, its host
    /// contains the base host, its port matches and its path contains the
    /// base path. A base without a port admits any port on its host.
    /// Candidates with an empty host are always rejected.
    pub fn contains(&self, candidate: &Url) -> bool {
        if candidate.scheme() != "http" && candidate.scheme() != "https" {
            return false;
        }

        let host = match extract_domain(candidate) {
            Some(h) if !h.is_empty() => h,
            _ => return false,
        };

        if self.port.is_some() && candidate.port() != self.port {
            return false;
        }

        host.contains(&self.host) && candidate.path().contains(&self.path)
    }
}

impl fmt::Display for BaseDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Free-function form of [`BaseDomain::contains`]
pub fn in_scope(candidate: &Url, base: &BaseDomain) -> bool {
    base.contains(candidate)
}
