//! Per-run synchronization metrics.
//!
//! Counters are recorded through `&self` so every stage of a run can share one
//! `SyncMetrics` without threading `&mut` through the pipeline.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for one synchronization run.
#[derive(Debug, Default)]
pub struct SyncMetrics {
    /// Target resource files written
    files_written: AtomicUsize,

    /// Directories found inside the source bundle and skipped
    directories_skipped: AtomicUsize,

    /// Values successfully translated by the provider
    keys_translated: AtomicUsize,

    /// Values whose translation failed and kept the source text
    keys_fallback: AtomicUsize,

    /// Values copied without translation (non-text, empty text)
    values_passed_through: AtomicUsize,

    /// Translations that lost placeholders, markup or URLs
    validation_warnings: AtomicUsize,
}

impl SyncMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_file_written(&self) {
        self.files_written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_directory_skipped(&self) {
        self.directories_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_translated(&self) {
        self.keys_translated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback(&self) {
        self.keys_fallback.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_passed_through(&self) {
        self.values_passed_through.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_warning(&self) {
        self.validation_warnings.fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot the counters into a report.
    pub fn report(&self) -> SyncReport {
        let translated = self.keys_translated.load(Ordering::Relaxed);
        let fallback = self.keys_fallback.load(Ordering::Relaxed);
        let attempted = translated + fallback;
        let fallback_rate = if attempted > 0 {
            (fallback as f64 / attempted as f64) * 100.0
        } else {
            0.0
        };

        SyncReport {
            files_written: self.files_written.load(Ordering::Relaxed),
            directories_skipped: self.directories_skipped.load(Ordering::Relaxed),
            keys_translated: translated,
            keys_fallback: fallback,
            values_passed_through: self.values_passed_through.load(Ordering::Relaxed),
            validation_warnings: self.validation_warnings.load(Ordering::Relaxed),
            fallback_rate,
        }
    }
}

/// Summary of a completed synchronization run.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub files_written: usize,
    pub directories_skipped: usize,
    pub keys_translated: usize,
    pub keys_fallback: usize,
    pub values_passed_through: usize,
    pub validation_warnings: usize,

    /// Share of translation attempts that fell back, as a percentage (0-100)
    pub fallback_rate: f64,
}

impl SyncReport {
    /// Whether every attempted translation succeeded.
    pub fn is_complete(&self) -> bool {
        self.keys_fallback == 0
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files written, {} keys translated, {} kept source text ({:.1}%), {} passed through, {} directories skipped",
            self.files_written,
            self.keys_translated,
            self.keys_fallback,
            self.fallback_rate,
            self.values_passed_through,
            self.directories_skipped
        )
    }
}
