//! DOM operations adapter.
//!
//! Thin layer over the `dom_query` crate: parsing, serialization and the
//! lookups of the `html > {head, body}` skeleton every document is expected
//! to have.

// Re-export core types for external use
pub use dom_query::{Document, NodeId, NodeRef};

pub use tendril::StrTendril;

use crate::encoding;
use crate::error::{Error, Result};

/// Number of leading bytes inspected when sniffing whether input is text.
const SNIFF_LEN: usize = 1024;

// === Parsing ===

/// Parse an HTML string into a document.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Parse raw HTML bytes into a document.
///
/// The bytes are transcoded to UTF-8 using the charset declared in the
/// document head. Input containing NUL bytes near its start is not text
/// markup and is rejected.
pub fn parse_bytes(raw: &[u8]) -> Result<Document> {
    if raw[..raw.len().min(SNIFF_LEN)].contains(&0) {
        return Err(Error::Parse("input looks like binary data".to_string()));
    }
    let html = encoding::transcode_to_utf8(raw);
    Ok(parse(&html))
}

// === Serialization ===

/// Serialize the whole document back to HTML.
#[inline]
#[must_use]
pub fn render(doc: &Document) -> StrTendril {
    doc.html()
}

// === Tag/Node Information ===

/// Get the tag name of an element node (lowercase).
#[inline]
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
    if node.is_element() {
        node.node_name().map(|t| t.to_string())
    } else {
        None
    }
}

/// Check whether `node` is an element with the given tag name.
#[must_use]
pub fn is_element_named(node: &NodeRef, tag: &str) -> bool {
    node.is_element() && node.node_name().is_some_and(|name| &*name == tag)
}

// === Document Skeleton ===

/// Get the `<html>` element: the first element child of the document root.
pub fn document_element(doc: &Document) -> Result<NodeRef<'_>> {
    let root = doc.root();
    let first = root
        .children()
        .into_iter()
        .find(NodeRef::is_element)
        .ok_or_else(|| Error::Structure("document has no root element".to_string()))?;
    if is_element_named(&first, "html") {
        Ok(first)
    } else {
        Err(Error::Structure(format!(
            "root element is <{}>, expected <html>",
            tag_name(&first).unwrap_or_default()
        )))
    }
}

/// Get the `<head>` element, a direct child of `<html>`.
pub fn head(doc: &Document) -> Result<NodeRef<'_>> {
    top_level(doc, "head")
}

/// Get the `<body>` element, a direct child of `<html>`.
pub fn body(doc: &Document) -> Result<NodeRef<'_>> {
    top_level(doc, "body")
}

fn top_level<'a>(doc: &'a Document, tag: &str) -> Result<NodeRef<'a>> {
    document_element(doc)?
        .children()
        .into_iter()
        .find(|child| is_element_named(child, tag))
        .ok_or_else(|| Error::Structure(format!("<{tag}> is not a child of <html>")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skeleton_lookups() {
        let doc = parse("<!DOCTYPE html><html><head><title>T</title></head><body><p>x</p></body></html>");

        assert!(is_element_named(&document_element(&doc).unwrap(), "html"));
        assert_eq!(tag_name(&head(&doc).unwrap()), Some("head".to_string()));
        assert_eq!(tag_name(&body(&doc).unwrap()), Some("body".to_string()));
    }

    #[test]
    fn test_parser_synthesizes_missing_skeleton() {
        // html5ever always creates html, head and body
        let doc = parse("<p>just a fragment</p>");

        assert!(head(&doc).is_ok());
        let body = body(&doc).unwrap();
        assert_eq!(body.children().len(), 1);
    }

    #[test]
    fn test_tag_name_of_text_node_is_none() {
        let doc = parse("<html><body>text</body></html>");
        let body = body(&doc).unwrap();
        let text = body.children()[0];

        assert!(text.is_text());
        assert_eq!(tag_name(&text), None);
        assert!(!is_element_named(&text, "text"));
    }

    #[test]
    fn test_parse_bytes_rejects_binary() {
        let raw = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
        assert!(matches!(parse_bytes(raw), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_bytes_transcodes_declared_charset() {
        let raw = b"<html><head><meta charset=\"ISO-8859-1\"><title>Caf\xE9</title></head><body></body></html>";
        let doc = parse_bytes(raw).unwrap();

        assert_eq!(&*doc.select("title").text(), "Café");
    }

    #[test]
    fn test_render_contains_body_content() {
        let doc = parse("<html><body><article>kept</article></body></html>");
        let html = render(&doc);

        assert!(html.contains("<article>kept</article>"));
    }
}
