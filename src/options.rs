//! Configuration options for shrinking documents.
//!
//! The `Options` struct controls which element is kept, where shrunk
//! documents are written and how a batch is run.

use std::path::PathBuf;

/// Tag name of the element whose subtree is preserved by default.
pub const DEFAULT_MARKER_TAG: &str = "article";

/// Configuration options for a shrink run.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use shrinkr::Options;
///
/// let options = Options {
///     output_dir: "shrunk".into(),
///     report_stats: false,
///     ..Options::default()
/// };
/// assert_eq!(options.marker_tag, "article");
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Tag name of the marker element.
    ///
    /// Default: `"article"`
    pub marker_tag: String,

    /// Directory the shrunk documents are written to. Created if absent.
    ///
    /// Default: `./`
    pub output_dir: PathBuf,

    /// Fixed output file name. When unset, the name is derived from the
    /// document title.
    ///
    /// Default: `None`
    pub output_name: Option<String>,

    /// Print the statistics report at the end of a batch.
    ///
    /// Default: `true`
    pub report_stats: bool,

    /// Process the documents of a batch on the rayon thread pool.
    ///
    /// Default: `false`
    pub parallel: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            marker_tag: DEFAULT_MARKER_TAG.to_string(),
            output_dir: PathBuf::from("./"),
            output_name: None,
            report_stats: true,
            parallel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_command_line_defaults() {
        let options = Options::default();
        assert_eq!(options.marker_tag, "article");
        assert_eq!(options.output_dir, PathBuf::from("./"));
        assert!(options.output_name.is_none());
        assert!(options.report_stats);
        assert!(!options.parallel);
    }
}
