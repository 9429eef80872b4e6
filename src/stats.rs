//! Size statistics for a batch of shrunk documents.
//!
//! One [`Stats`] value is owned by the batch driver. Every successfully
//! written document adds its input and output size; failed documents add
//! nothing.

use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

const KIB: i64 = 1024;

/// Accumulated sizes of one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    count: usize,
    original_bytes: i64,
    reduced_bytes: i64,
    started: Option<Instant>,
    elapsed: Option<Duration>,
}

impl Stats {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the batch clock.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
        self.elapsed = None;
    }

    /// Stop the batch clock. Does nothing if it was never started.
    pub fn stop(&mut self) {
        if let Some(started) = self.started {
            self.elapsed = Some(started.elapsed());
        }
    }

    /// Milliseconds between `start` and `stop`, or up to now if still running.
    #[must_use]
    pub fn elapsed_millis(&self) -> u64 {
        let elapsed = match (self.elapsed, self.started) {
            (Some(elapsed), _) => elapsed,
            (None, Some(started)) => started.elapsed(),
            (None, None) => Duration::ZERO,
        };
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
    }

    /// Record one processed document.
    pub fn add_sizes(&mut self, original: i64, reduced: i64) {
        self.original_bytes += original;
        self.reduced_bytes += reduced;
        self.count += 1;
    }

    /// Bytes saved over the batch. Negative if documents grew.
    #[must_use]
    pub fn reduced_by(&self) -> i64 {
        self.original_bytes - self.reduced_bytes
    }

    /// Number of processed documents.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Cumulated size of the original documents.
    #[must_use]
    pub fn original_bytes(&self) -> i64 {
        self.original_bytes
    }

    /// Cumulated size of the shrunk documents.
    #[must_use]
    pub fn reduced_bytes(&self) -> i64 {
        self.reduced_bytes
    }

    /// Snapshot the counters for reporting.
    #[must_use]
    pub fn report(&self) -> Report {
        Report {
            count: self.count,
            elapsed_ms: self.elapsed_millis(),
            saved_bytes: self.reduced_by(),
            original_bytes: self.original_bytes,
            reduced_bytes: self.reduced_bytes,
        }
    }
}

/// End-of-batch statistics.
///
/// `Display` renders the human readable block; serializing gives the raw
/// numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Number of processed documents.
    pub count: usize,
    /// Wall-clock duration of the batch.
    pub elapsed_ms: u64,
    /// Original minus reduced size.
    pub saved_bytes: i64,
    /// Cumulated size of the inputs.
    pub original_bytes: i64,
    /// Cumulated size of the outputs.
    pub reduced_bytes: i64,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------\nStatistics\n----------")?;
        writeln!(
            f,
            "{} articles were processed in {}ms",
            self.count, self.elapsed_ms
        )?;
        writeln!(
            f,
            "reducing the cumulated size by {} from {} to {}",
            format_file_size(self.saved_bytes),
            format_file_size(self.original_bytes),
            format_file_size(self.reduced_bytes)
        )?;
        write!(f, "----------")
    }
}

/// Render a byte count as `B`, `KB` or `MB`.
///
/// The MB figure is the KB quotient divided by 1024 once more, not a
/// separate division of the byte count by 1024².
///
/// ```
/// use shrinkr::stats::format_file_size;
///
/// assert_eq!(format_file_size(750), "750 B");
/// assert_eq!(format_file_size(5_000), "4.88 KB");
/// ```
#[must_use]
pub fn format_file_size(size: i64) -> String {
    if size < KIB {
        return format!("{size} B");
    }
    let kb = size as f64 / KIB as f64;
    if kb < KIB as f64 {
        return format!("{kb:.2} KB");
    }
    let mb = kb / KIB as f64;
    format!("{mb:.2} MB")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stats_is_empty() {
        let stats = Stats::new();
        assert_eq!(stats.count(), 0);
        assert_eq!(stats.reduced_by(), 0);
        assert_eq!(stats.elapsed_millis(), 0);
    }

    #[test]
    fn test_add_sizes() {
        let mut stats = Stats::new();
        stats.add_sizes(2000, 500);
        assert_eq!(stats.count(), 1);
        assert_eq!(stats.original_bytes(), 2000);
        assert_eq!(stats.reduced_bytes(), 500);

        stats.add_sizes(1200, 400);
        assert_eq!(stats.count(), 2);
        assert_eq!(stats.original_bytes(), 3200);
        assert_eq!(stats.reduced_bytes(), 900);
        assert_eq!(stats.reduced_by(), 2300);
    }

    #[test]
    fn test_grown_document_gives_negative_saving() {
        let mut stats = Stats::new();
        stats.add_sizes(100, 150);
        assert_eq!(stats.reduced_by(), -50);
        assert_eq!(format_file_size(stats.reduced_by()), "-50 B");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(750), "750 B");
        assert_eq!(format_file_size(5_000), "4.88 KB");
        assert_eq!(format_file_size(5_000_000), "4.77 MB");
        assert_eq!(format_file_size(5_000_000_000), "4768.37 MB");
    }

    #[test]
    fn test_format_file_size_boundaries() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(1023), "1023 B");
        assert_eq!(format_file_size(1024), "1.00 KB");
        assert_eq!(format_file_size(1024 * 1024 - 1), "1024.00 KB");
        assert_eq!(format_file_size(1024 * 1024), "1.00 MB");
    }

    #[test]
    fn test_clock_stops() {
        let mut stats = Stats::new();
        stats.start();
        stats.stop();
        let first = stats.elapsed_millis();
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(stats.elapsed_millis(), first);
    }

    #[test]
    fn test_report_display() {
        let mut stats = Stats::new();
        stats.add_sizes(5_000, 750);
        let mut report = stats.report();
        report.elapsed_ms = 12;

        assert_eq!(
            report.to_string(),
            "----------\nStatistics\n----------\n\
             1 articles were processed in 12ms\n\
             reducing the cumulated size by 4.15 KB from 4.88 KB to 750 B\n\
             ----------"
        );
    }

    #[test]
    fn test_report_serializes_raw_numbers() {
        let mut stats = Stats::new();
        stats.add_sizes(2000, 500);
        let json = serde_json::to_value(stats.report()).unwrap();

        assert_eq!(json["count"], 1);
        assert_eq!(json["saved_bytes"], 1500);
        assert_eq!(json["original_bytes"], 2000);
    }
}
