//! Batch pipeline for leak-stats.
//!
//! Loads a directory of traces, parses reports and aggregates them into a
//! single [`Statistics`], returning a [`BatchSummary`] alongside for logging.

use std::path::Path;

use leak_core::error::Result;
use tracing::info;

use crate::aggregator::Statistics;
use crate::parser::ReportParser;
use crate::reader::load_property_files;

// ── Public types ──────────────────────────────────────────────────────────────

/// Yield counters for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Property lists decoded from the input directory.
    pub files_loaded: usize,
    /// Files that produced a [`Report`](leak_core::models::Report).
    pub reports_parsed: usize,
    /// Loaded files that were not valid reports.
    pub files_skipped: usize,
    /// Leak records fed into the statistics.
    pub leaks_aggregated: usize,
}

/// The complete output of [`analyze_directory`].
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub statistics: Statistics,
    pub summary: BatchSummary,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run load -> parse -> aggregate over `input_dir`.
///
/// Only a failure to list `input_dir` is an error; everything unparseable is
/// dropped and reflected in the returned [`BatchSummary`].
pub fn analyze_directory(
    input_dir: &Path,
    retain_only_app_name_leaks: bool,
) -> Result<BatchResult> {
    let files = load_property_files(input_dir)?;
    let parser = ReportParser::new(retain_only_app_name_leaks);

    let mut statistics = Statistics::new();
    let mut summary = BatchSummary {
        files_loaded: files.len(),
        ..BatchSummary::default()
    };

    for report in parser.parse_all(&files) {
        summary.reports_parsed += 1;
        summary.leaks_aggregated += report.leaks.len();
        statistics.analyze(&report);
    }
    summary.files_skipped = summary.files_loaded - summary.reports_parsed;

    info!(
        "Aggregated {} leak records from {} reports ({} of {} files skipped)",
        summary.leaks_aggregated,
        statistics.reports_analyzed(),
        summary.files_skipped,
        summary.files_loaded
    );
    info!(
        "{} leaked instances across {} leak types",
        statistics.total_count(),
        statistics.len()
    );

    Ok(BatchResult {
        statistics,
        summary,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
