//! HTML cleaning applied before saving when `clean` is enabled

use scraper::{Html, Node};

/// Elements removed together with their content
const STRIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "object", "embed"];

/// Removes active content and comments from an HTML document
///
/// The document is parsed leniently and serialized again, so the output is
/// well-formed HTML even when the input was not.
///
/// # Example
///
/// ```
/// use site_mirror::crawler::clean_html;
///
/// let cleaned = clean_html(b"<p>Hi</p><script>alert(1)</script>");
/// let cleaned = String::from_utf8(cleaned).unwrap();
/// assert!(cleaned.contains("<p>Hi</p>"));
/// assert!(!cleaned.contains("alert"));
/// ```
pub fn clean_html(html: &[u8]) -> Vec<u8> {
    let source = String::from_utf8_lossy(html);
    let mut document = Html::parse_document(&source);

    let doomed: Vec<_> = document
        .tree
        .nodes()
        .filter(|node| match node.value() {
            Node::Comment(_) => true,
            Node::Element(element) => STRIPPED_ELEMENTS.contains(&element.name()),
            _ => false,
        })
        .map(|node| node.id())
        .collect();

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    document.html().into_bytes()
}
