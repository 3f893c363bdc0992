//! Report parsing for leak-stats.
//!
//! Turns a loaded [`PropertyFile`] into a typed [`Report`], using the
//! filename for the application name and capture time and the profiler's
//! leak collection for the records.

use chrono::{DateTime, Local};
use leak_core::data_processors::RecordDecoder;
use leak_core::models::{LeakRecord, PropertyFile, Report, LEAKS_COLLECTION_KEY};
use leak_core::time_utils::parse_report_timestamp;
use plist::{Dictionary, Value};
use tracing::debug;

// ── ReportParser ──────────────────────────────────────────────────────────────

/// Builds [`Report`]s from loaded property lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportParser {
    /// Keep only leaks whose guessed app name equals the report's app name.
    retain_only_app_name_leaks: bool,
}

impl ReportParser {
    /// Create a parser.  The batch tool passes `false`, counting every leak.
    pub fn new(retain_only_app_name_leaks: bool) -> Self {
        Self {
            retain_only_app_name_leaks,
        }
    }

    /// Parse one file into a [`Report`].
    ///
    /// Returns `None` when the filename is not `{app}-{yyyyMMddHHmmss}-{suffix}`
    /// or the leak collection is missing or not a list of dictionaries.
    /// Individual leak entries that fail to decode are dropped without
    /// failing the report.
    pub fn parse(&self, file: &PropertyFile) -> Option<Report> {
        let Some((app_name, created_at)) = split_filename(&file.filename) else {
            debug!("Skipping {}: unexpected filename shape", file.filename);
            return None;
        };

        let Some(raw_leaks) = leak_collection(&file.dict) else {
            debug!("Skipping {}: no leak collection", file.filename);
            return None;
        };

        let total = raw_leaks.len();
        let leaks: Vec<LeakRecord> = raw_leaks
            .into_iter()
            .filter_map(RecordDecoder::decode)
            .filter(|leak| self.keeps(leak, app_name))
            .collect();

        debug!(
            "Report {}: {} of {} leak entries kept",
            file.filename,
            leaks.len(),
            total
        );

        Some(Report {
            app_name: app_name.to_string(),
            created_at,
            leaks,
        })
    }

    /// Parse every file, silently omitting those that do not form a report.
    pub fn parse_all(&self, files: &[PropertyFile]) -> Vec<Report> {
        files.iter().filter_map(|file| self.parse(file)).collect()
    }

    fn keeps(&self, leak: &LeakRecord, app_name: &str) -> bool {
        !self.retain_only_app_name_leaks || leak.possible_app_name.as_deref() == Some(app_name)
    }
}

// ── Filename handling ─────────────────────────────────────────────────────────

/// Split `{app}-{yyyyMMddHHmmss}-{suffix}` into the app name and timestamp.
///
/// The filename must contain exactly two `-` separators.
pub fn split_filename(filename: &str) -> Option<(&str, DateTime<Local>)> {
    let components: Vec<&str> = filename.split('-').collect();
    let [app_name, timestamp, _suffix] = components.as_slice() else {
        return None;
    };
    let created_at = parse_report_timestamp(timestamp)?;
    Some((*app_name, created_at))
}

/// The raw leak entries, only when every element is a dictionary.
fn leak_collection(root: &Dictionary) -> Option<Vec<&Dictionary>> {
    root.get(LEAKS_COLLECTION_KEY)?
        .as_array()?
        .iter()
        .map(Value::as_dictionary)
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
