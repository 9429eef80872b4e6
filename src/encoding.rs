//! Character encoding detection for saved pages.
//!
//! Pages saved from a browser keep the charset they were served with. The
//! declared charset is read from the first kilobyte and the bytes are decoded
//! to UTF-8 before parsing.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Only this many leading bytes are searched for a charset declaration.
const DECLARATION_WINDOW: usize = 1024;

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`
#[allow(clippy::expect_used)]
static HTTP_EQUIV_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>]+)"#)
        .expect("valid regex")
});

/// Find the encoding declared in the document head, if any and if known.
fn declared_encoding(head: &str) -> Option<&'static Encoding> {
    [&*META_CHARSET_RE, &*HTTP_EQUIV_CHARSET_RE]
        .into_iter()
        .filter_map(|re| re.captures(head)?.get(1))
        .find_map(|label| Encoding::for_label(label.as_str().as_bytes()))
}

/// Detect the character encoding of raw HTML bytes, defaulting to UTF-8.
#[must_use]
pub fn detect_encoding(raw: &[u8]) -> &'static Encoding {
    let head = String::from_utf8_lossy(&raw[..raw.len().min(DECLARATION_WINDOW)]);
    declared_encoding(&head).unwrap_or(UTF_8)
}

/// Decode raw HTML bytes to a UTF-8 string.
///
/// Invalid sequences are replaced with U+FFFD rather than failing.
///
/// ```
/// use shrinkr::encoding::transcode_to_utf8;
///
/// let html = transcode_to_utf8(b"<html><body>plain</body></html>");
/// assert!(html.contains("plain"));
/// ```
#[must_use]
pub fn transcode_to_utf8(raw: &[u8]) -> Cow<'_, str> {
    let encoding = detect_encoding(raw);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(raw);
    }
    let (decoded, _, _) = encoding.decode(raw);
    decoded
}
