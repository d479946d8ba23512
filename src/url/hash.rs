use crate::UrlError;
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Fixed-length digest of a lower-cased canonical URL
///
/// Used as the visited-set key in place of the URL string itself.
/// Two URLs that normalize identically hash identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlHash([u8; 32]);

impl UrlHash {
    /// Hashes a canonical URL
    pub fn of(url: &Url) -> Self {
        Self::of_str(url.as_str())
    }

    /// Hashes a canonical URL string; case is ignored
    pub fn of_str(canonical: &str) -> Self {
        let digest = Sha256::digest(canonical.to_lowercase().as_bytes());
        Self(digest.into())
    }

    /// Hex rendering used in the visited file
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parses the 64-character hex rendering produced by [`UrlHash::to_hex`]
    pub fn from_hex(s: &str) -> Result<Self, UrlError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim(), &mut bytes)
            .map_err(|e| UrlError::Malformed(format!("Invalid URL hash '{}': {}", s, e)))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for UrlHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for UrlHash {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            UrlHash::of_str("https://example.com/Docs/"),
            UrlHash::of_str("https://example.com/docs/")
        );
    }

    #[test]
    fn test_distinct_urls() {
        assert_ne!(
            UrlHash::of_str("https://example.com/a/"),
            UrlHash::of_str("https://example.com/b/")
        );
    }

    #[test]
    fn test_hex_parse() {
        let hash = UrlHash::of_str("https://example.com/");
        let hex = hash.to_hex();

        assert_eq!(hex.len(), 64);
        assert_eq!(hex.parse::<UrlHash>().unwrap(), hash);
    }

    #[test]
    fn test_rejects_bad_hex() {
        assert!(UrlHash::from_hex("https://example.com/").is_err());
        assert!(UrlHash::from_hex("abcd").is_err());
    }
}
