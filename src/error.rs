//! Error types for shrinkr.
//!
//! Every way a document can fail to shrink has its own variant so that batch
//! drivers can decide per document whether to skip it or abort.

use std::path::PathBuf;

/// Process exit code for a successful run.
pub const EXIT_SUCCESS: u8 = 0;
/// Process exit code when a required argument is missing or malformed.
pub const EXIT_USAGE: u8 = 1;
/// Process exit code when an input path does not exist.
pub const EXIT_NOT_FOUND: u8 = 2;
/// Process exit code when an input could not be parsed into a document.
pub const EXIT_PARSE: u8 = 3;
/// Process exit code when a document has no marker element.
pub const EXIT_NO_MARKER: u8 = 4;
/// Process exit code for any other I/O failure.
pub const EXIT_IO: u8 = 5;

/// Error type for shrink operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document does not have the `html > {head, body}` shape.
    #[error("Unexpected document structure: {0}")]
    Structure(String),

    /// No marker element exists under `<body>`.
    #[error("No <{marker}> element found")]
    MarkerNotFound {
        /// Tag name that was searched for.
        marker: String,
    },

    /// `<head>` has no `<title>` or the title is empty.
    #[error("No <title> found in document head")]
    TitleNotFound,

    /// Input could not be turned into a markup document.
    #[error("HTML parsing failed: {0}")]
    Parse(String),

    /// Input path (or glob pattern) matched nothing.
    #[error("File does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading, writing or stat-ing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path the operation was performed on.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Glob pattern is malformed.
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// Wraps an I/O error, turning `ErrorKind::NotFound` into [`Error::NotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }

    /// Exit code reported by the command-line tool for this error.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::NotFound(_) => EXIT_NOT_FOUND,
            Self::Parse(_) | Self::Structure(_) | Self::TitleNotFound => EXIT_PARSE,
            Self::MarkerNotFound { .. } => EXIT_NO_MARKER,
            Self::Pattern(_) => EXIT_USAGE,
            Self::Io { .. } => EXIT_IO,
        }
    }
}

/// Result type alias for shrink operations.
pub type Result<T> = std::result::Result<T, Error>;
