//! HTML parser for extracting links and metadata
//!
//! This module handles parsing HTML content to extract:
//! - Links to follow (anchors, frames and iframes)
//! - Page title, for logging

use scraper::{Html, Selector};
use url::Url;

/// Element/attribute pairs that reference other documents
const LINK_SOURCES: &[(&str, &str)] = &[("a[href]", "href"), ("frame[src]", "src"), ("iframe[src]", "src")];

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// All links found on the page (absolute URLs)
    pub links: Vec<String>,
}

/// Parses HTML content and extracts links and metadata
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">`
/// - `<frame src="...">`
/// - `<iframe src="...">`
///
/// **Exclude:**
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only references to the same page
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The page URL used to resolve relative links
///
/// # Example
///
/// ```
/// use site_mirror::crawler::parse_html;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let base_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_html(html, &base_url);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_html(html: &str, base_url: &Url) -> ParsedPage {
    // html5ever recovers from any markup, so parsing itself cannot fail
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let links = collect_links(&document, base_url);

    ParsedPage { title, links }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts every followable reference from the HTML document
fn collect_links(document: &Html, base_url: &Url) -> Vec<String> {
    let mut links = Vec::new();

    for (selector, attribute) in LINK_SOURCES {
        let Ok(selector) = Selector::parse(selector) else {
            continue;
        };

        for element in document.select(&selector) {
            if let Some(reference) = element.value().attr(attribute) {
                if let Some(absolute_url) = resolve_link(reference, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    // Same page anchors
    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url.to_string())
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

/// Extracts absolute links from raw page bytes
///
/// Non-UTF-8 content is decoded lossily. Content that is not HTML at all
/// simply yields no links.
pub fn extract_links(html: &[u8], page_url: &Url) -> Vec<String> {
    let source = String::from_utf8_lossy(html);
    let parsed = parse_html(&source, page_url);

    if let Some(title) = &parsed.title {
        tracing::trace!("Parsed '{}' at {}", title, page_url);
    }
    parsed.links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/docs/page/").unwrap()
    }

    #[test]
    fn test_extract_title() {
        let html = r#"<html><head><title>  Test Page  </title></head><body></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.title, Some("Test Page".to_string()));
    }

    #[test]
    fn test_no_title() {
        let html = r#"<html><head></head><body></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.title, None);
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.links, vec!["https://other.com/page".to_string()]);
    }

    #[test]
    fn test_extract_root_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.links, vec!["https://example.com/other".to_string()]);
    }

    #[test]
    fn test_extract_relative_path_link() {
        let html = r#"<html><body><a href="child.html">Link</a><a href="../up">Up</a></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(
            parsed.links,
            vec![
                "https://example.com/docs/page/child.html".to_string(),
                "https://example.com/docs/up".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_frameset_frames() {
        let html = r#"
            <html>
            <frameset>
                <frame src="/menu.html">
                <frame src="content/">
            </frameset>
            </html>
        "#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(
            parsed.links,
            vec![
                "https://example.com/menu.html".to_string(),
                "https://example.com/docs/page/content/".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_body_iframe() {
        let html = r#"<html><body><p>Intro</p><iframe src="https://example.com/embed/"></iframe></body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert_eq!(parsed.links, vec!["https://example.com/embed/".to_string()]);
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"<html><body>
            <a href="javascript:void(0)">JS</a>
            <a href="MAILTO:test@example.com">Email</a>
            <a href="tel:+1234567890">Call</a>
            <a href="data:text/html,<h1>Test</h1>">Data</a>
            <a href="ftp://example.com/file">FTP</a>
        </body></html>"#;
        let parsed = parse_html(html, &base_url());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_skip_fragment_only_and_empty() {
        let html = r##"<html><body><a href="#section">Jump</a><a href="  ">Blank</a></body></html>"##;
        let parsed = parse_html(html, &base_url());
        assert!(parsed.links.is_empty());
    }

    #[test]
    fn test_extract_links_from_bytes() {
        let html = b"<html><body><a href=\"/a\">A</a>\xff<a href=\"/b.html\">B</a></body></html>";
        let links = extract_links(html, &base_url());
        assert_eq!(
            links,
            vec![
                "https://example.com/a".to_string(),
                "https://example.com/b.html".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_links_from_non_html() {
        let links = extract_links(b"just some plain text", &base_url());
        assert!(links.is_empty());
    }
}
