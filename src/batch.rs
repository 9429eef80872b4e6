//! Batch driver: shrink every file matching a glob pattern.
//!
//! Each document is read, parsed, pruned, rendered and written on its own.
//! Nothing is shared between documents except the [`Stats`] accumulator,
//! which is only updated after all documents are done. That keeps totals
//! identical whether the batch runs sequentially or on the rayon pool.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dom;
use crate::error::{Error, Result};
use crate::locate;
use crate::prune;
use crate::stats::Stats;
use crate::title;
use crate::Options;

/// File stem used when neither a title nor the input name gives one.
const PLACEHOLDER_STEM: &str = "untitled";

/// A document that was shrunk and written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Path the document was read from.
    pub input: PathBuf,
    /// Path the shrunk document was written to.
    pub output: PathBuf,
    /// Size of the input file in bytes.
    pub original_bytes: i64,
    /// Size of the output file in bytes.
    pub reduced_bytes: i64,
    /// Number of nodes detached from `<body>`.
    pub nodes_removed: usize,
}

/// Result of a whole batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Accumulated sizes of the successfully processed documents.
    pub stats: Stats,
    /// Successfully processed documents, in input order.
    pub processed: Vec<FileOutcome>,
    /// Documents that failed, in input order.
    pub failures: Vec<(PathBuf, Error)>,
}

impl BatchOutcome {
    /// Take the error the batch as a whole should fail with.
    ///
    /// A batch of one file fails with that file's error. Larger batches
    /// succeed; their per-file failures stay in [`BatchOutcome::failures`].
    pub fn take_exit_error(&mut self) -> Option<Error> {
        if self.processed.len() + self.failures.len() != 1 {
            return None;
        }
        self.failures.pop().map(|(_, err)| err)
    }
}

/// Expand a glob pattern into the matching files, in lexical order.
///
/// A pattern that matches nothing is reported as [`Error::NotFound`].
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) => files.push(path),
            Err(err) => log::warn!("skipping {}: {}", err.path().display(), err.error()),
        }
    }
    if files.is_empty() {
        return Err(Error::NotFound(PathBuf::from(pattern)));
    }
    Ok(files)
}

/// Create `dir` (and its parents) unless it already exists.
pub fn create_dir_if_absent(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|err| Error::io(dir, err))
}

/// Where the shrunk version of `input` is written.
///
/// A configured output name wins. Otherwise the file is named after the
/// shortened title, falling back to the input's file stem.
#[must_use]
pub fn output_path(options: &Options, title: Option<&str>, input: &Path) -> PathBuf {
    if let Some(name) = &options.output_name {
        return options.output_dir.join(name);
    }
    let stem = title
        .and_then(title::file_stem)
        .or_else(|| {
            input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| PLACEHOLDER_STEM.to_string());
    options.output_dir.join(format!("{stem}.html"))
}

/// Shrink a single file according to `options`.
///
/// Nothing is written unless the document has a marker element.
pub fn process_file(input: &Path, options: &Options) -> Result<FileOutcome> {
    log::info!("shrinking {}...", input.display());
    let raw = fs::read(input).map_err(|err| Error::io(input, err))?;
    let doc = dom::parse_bytes(&raw)?;

    let body = dom::body(&doc)?;
    let found = locate::locate(&body, &options.marker_tag).ok_or_else(|| Error::MarkerNotFound {
        marker: options.marker_tag.clone(),
    })?;

    let title = match title::extract_title(&doc) {
        Ok(title) => Some(title),
        Err(Error::TitleNotFound) => {
            log::warn!("{} has no title, naming output after the input", input.display());
            None
        }
        Err(err) => return Err(err),
    };

    create_dir_if_absent(&options.output_dir)?;
    let output = output_path(options, title.as_deref(), input);

    let nodes_removed = prune::prune(&body, &found)?;
    log::debug!("{}: removed {nodes_removed} nodes", input.display());

    log::info!("writing {}...", output.display());
    fs::write(&output, dom::render(&doc).as_bytes()).map_err(|err| Error::io(&output, err))?;

    Ok(FileOutcome {
        original_bytes: file_size(input)?,
        reduced_bytes: file_size(&output)?,
        input: input.to_path_buf(),
        output,
        nodes_removed,
    })
}

/// Shrink the given files, usually the result of [`expand_pattern`].
///
/// Per-document failures are collected in [`BatchOutcome::failures`] and do
/// not stop the batch.
#[must_use]
pub fn run_batch(files: &[PathBuf], options: &Options) -> BatchOutcome {
    if options.output_name.is_some() && files.len() > 1 {
        log::warn!(
            "{} files share one output name, only the last one will be kept",
            files.len()
        );
    }

    let mut stats = Stats::new();
    stats.start();

    let results: Vec<(PathBuf, Result<FileOutcome>)> = if options.parallel {
        files
            .par_iter()
            .map(|file| (file.clone(), process_file(file, options)))
            .collect()
    } else {
        files
            .iter()
            .map(|file| (file.clone(), process_file(file, options)))
            .collect()
    };

    let mut processed = Vec::new();
    let mut failures = Vec::new();
    for (file, result) in results {
        match result {
            Ok(outcome) => {
                stats.add_sizes(outcome.original_bytes, outcome.reduced_bytes);
                processed.push(outcome);
            }
            Err(err) => {
                log::warn!("{}: {err}", file.display());
                failures.push((file, err));
            }
        }
    }

    stats.stop();
    BatchOutcome {
        stats,
        processed,
        failures,
    }
}

fn file_size(path: &Path) -> Result<i64> {
    let meta = fs::metadata(path).map_err(|err| Error::io(path, err))?;
    Ok(i64::try_from(meta.len()).unwrap_or(i64::MAX))
}
