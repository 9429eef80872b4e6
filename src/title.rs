//! Title lookup and output file naming.
//!
//! Saved articles are named after their `<title>`. Site names appended after
//! a `" |"` and trailing sentences after the first `.` are cut off.

use crate::dom::{self, Document};
use crate::error::{Error, Result};

/// Longest file stem in bytes; leaves room for the extension within the
/// usual 255-byte file name limit.
pub const MAX_STEM_BYTES: usize = 200;

/// Get the text of the `<title>` element in `<head>`.
///
/// Fails with [`Error::TitleNotFound`] when there is no title or it holds
/// only whitespace, and with [`Error::Structure`] when `<head>` is missing.
pub fn extract_title(doc: &Document) -> Result<String> {
    let head = dom::head(doc)?;
    let title = head
        .children()
        .into_iter()
        .find(|child| dom::is_element_named(child, "title"))
        .ok_or(Error::TitleNotFound)?;

    let text = title.text();
    if text.trim().is_empty() {
        return Err(Error::TitleNotFound);
    }
    Ok(text.to_string())
}

/// Cut site metadata and trailing sentences off a title.
///
/// ```
/// use shrinkr::title::shorten_title;
///
/// assert_eq!(shorten_title("Foo Bar | Site Name"), "Foo Bar");
/// assert_eq!(shorten_title("Breaking news. More details inside"), "Breaking news");
/// ```
#[must_use]
pub fn shorten_title(title: &str) -> &str {
    let title = title.split_once(" |").map_or(title, |(head, _)| head);
    title.split_once('.').map_or(title, |(head, _)| head)
}

/// Derive a file stem from a title.
///
/// The title is shortened, path separators and control characters are
/// replaced, the result is cut to [`MAX_STEM_BYTES`] on a character
/// boundary and surrounding whitespace is trimmed. Returns `None` if nothing
/// usable is left.
#[must_use]
pub fn file_stem(title: &str) -> Option<String> {
    let stem: String = shorten_title(title)
        .chars()
        .map(|c| match c {
            '/' | '\\' => '-',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();

    let stem = truncate_to_boundary(stem.trim(), MAX_STEM_BYTES).trim_end();
    (!stem.is_empty()).then(|| stem.to_string())
}

fn truncate_to_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn test_shorten_title() {
        assert_eq!(shorten_title("Foo Bar | Site Name"), "Foo Bar");
        assert_eq!(shorten_title("Breaking news. More details inside"), "Breaking news");
        assert_eq!(shorten_title("Plain Title"), "Plain Title");
    }

    #[test]
    fn test_shorten_title_uses_first_cut_points() {
        assert_eq!(shorten_title("A | B | C"), "A");
        assert_eq!(shorten_title("One. Two. | Site"), "One");
        // a bar without a leading space is not a cut point
        assert_eq!(shorten_title("Left|Right"), "Left|Right");
    }

    #[test]
    fn test_extract_title() {
        let doc = parse("<html><head><title>Foo Bar | Site Name</title></head><body></body></html>");
        assert_eq!(extract_title(&doc).unwrap(), "Foo Bar | Site Name");
    }

    #[test]
    fn test_missing_title() {
        let doc = parse("<html><head><meta charset=\"utf-8\"></head><body></body></html>");
        assert!(matches!(extract_title(&doc), Err(Error::TitleNotFound)));
    }

    #[test]
    fn test_empty_title() {
        let doc = parse("<html><head><title>  </title></head><body></body></html>");
        assert!(matches!(extract_title(&doc), Err(Error::TitleNotFound)));
    }

    #[test]
    fn test_title_in_body_is_ignored() {
        let doc = parse("<html><head></head><body><svg><title>icon</title></svg></body></html>");
        assert!(matches!(extract_title(&doc), Err(Error::TitleNotFound)));
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("Foo Bar | Site Name"), Some("Foo Bar".to_string()));
        assert_eq!(file_stem("\n  Either/Or\tChoice  "), Some("Either-Or Choice".to_string()));
        assert_eq!(file_stem(".hidden"), None);
        assert_eq!(file_stem(" | Site"), None);
    }

    #[test]
    fn test_long_file_stem_is_truncated() {
        let stem = file_stem(&"word ".repeat(60)).unwrap();
        assert!(stem.len() <= MAX_STEM_BYTES);
        assert!(stem.starts_with("word word"));
        assert!(!stem.ends_with(' '));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // three bytes per char, so the limit falls inside a character
        let stem = file_stem(&"\u{65e5}".repeat(100)).unwrap();
        assert_eq!(stem.len(), 198);
        assert!(stem.chars().all(|c| c == '\u{65e5}'));
    }
}
