//! # shrinkr
//!
//! Shrinks saved web pages down to their `<article>` element.
//!
//! Pages saved from news sites usually carry far more navigation, teasers
//! and related-article lists than article text. `shrinkr` keeps the first
//! `<article>` element under `<body>` together with its chain of ancestors
//! and detaches everything else below `<body>`, at every nesting level.
//! `<head>` is left alone.
//!
//! ## Quick Start
//!
//! ```rust
//! use shrinkr::{dom, shrink_document};
//!
//! let doc = dom::parse(
//!     "<html><head><title>News</title></head><body>\
//!      <nav>menu</nav><article><p>Story</p></article><footer>links</footer>\
//!      </body></html>",
//! );
//! let removed = shrink_document(&doc, "article")?;
//! assert_eq!(removed, 2);
//! assert!(dom::render(&doc).contains("<body><article><p>Story</p></article></body>"));
//! # Ok::<(), shrinkr::Error>(())
//! ```
//!
//! Batches of files are handled by [`batch::run_batch`], which also keeps the
//! size [`stats`].

mod error;
mod options;

/// DOM adapter: parsing, serialization, document skeleton lookups.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Marker element search.
pub mod locate;

/// Sibling pruning around the marker.
pub mod prune;

/// Title lookup and output file naming.
pub mod title;

/// Size statistics and the batch report.
pub mod stats;

/// Glob-driven batch processing of files.
pub mod batch;

// Public API - re-exports
pub use error::{
    Error, Result, EXIT_IO, EXIT_NOT_FOUND, EXIT_NO_MARKER, EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE,
};
pub use locate::{has_marker, locate, MarkerMatch};
pub use options::{Options, DEFAULT_MARKER_TAG};
pub use prune::{prune, shrink_document};
pub use stats::{format_file_size, Report, Stats};

/// Shrink an HTML string and return the rendered result.
///
/// Convenience wrapper around [`dom::parse`], [`shrink_document`] and
/// [`dom::render`].
///
/// ```rust
/// let html = shrinkr::shrink_html(
///     "<html><body><div>banner</div><article>text</article></body></html>",
///     "article",
/// )?;
/// assert!(!html.contains("banner"));
/// # Ok::<(), shrinkr::Error>(())
/// ```
pub fn shrink_html(html: &str, marker_tag: &str) -> Result<String> {
    let doc = dom::parse(html);
    shrink_document(&doc, marker_tag)?;
    Ok(dom::render(&doc).to_string())
}
