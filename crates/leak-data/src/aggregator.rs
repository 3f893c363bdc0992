//! Leak-count aggregation across reports.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::Path;

use leak_core::error::{LeakStatsError, Result};
use leak_core::models::Report;
use serde::{Deserialize, Serialize};

// ── StatisticsDocument ────────────────────────────────────────────────────────

/// On-disk form of [`Statistics`]: a single `leaksCountByName` dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsDocument {
    #[serde(rename = "leaksCountByName")]
    pub leaks_count_by_name: BTreeMap<String, i64>,
}

// ── Statistics ────────────────────────────────────────────────────────────────

/// Running leak totals keyed by [`LeakRecord::id`](leak_core::models::LeakRecord::id).
///
/// Built once per batch and fed one report at a time; the order in which
/// reports are analysed does not change the totals.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    leaks_count_by_name: HashMap<String, i64>,
    reports_analyzed: usize,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every leak's `count` to the total for its identity.
    ///
    /// Totals saturate at `i64::MAX`.
    pub fn analyze(&mut self, report: &Report) {
        for leak in &report.leaks {
            let total = self
                .leaks_count_by_name
                .entry(leak.id().to_string())
                .or_insert(0);
            *total = total.saturating_add(leak.count);
        }
        self.reports_analyzed += 1;
    }

    /// Total for one identity, if it was seen.
    pub fn get(&self, id: &str) -> Option<i64> {
        self.leaks_count_by_name.get(id).copied()
    }

    /// Number of distinct leak identities.
    pub fn len(&self) -> usize {
        self.leaks_count_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaks_count_by_name.is_empty()
    }

    /// Sum of all totals, saturating at `i64::MAX`.
    pub fn total_count(&self) -> i64 {
        self.leaks_count_by_name
            .values()
            .fold(0_i64, |sum, count| sum.saturating_add(*count))
    }

    pub fn reports_analyzed(&self) -> usize {
        self.reports_analyzed
    }

    /// `(id, total)` pairs, largest total first.
    ///
    /// Equal totals keep the map's iteration order, which is unspecified.
    pub fn ranked_listing(&self) -> Vec<(&str, i64)> {
        let mut ranked: Vec<(&str, i64)> = self
            .leaks_count_by_name
            .iter()
            .map(|(id, count)| (id.as_str(), *count))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// Write the human-readable summary: `No leaks.` or a `Found leaks:`
    /// header followed by one ` <count>x <id>` line per identity.
    pub fn write_summary<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        out.write_all(self.render_summary().as_bytes())
    }

    /// The summary as a string, one `\n`-terminated line per entry.
    pub fn render_summary(&self) -> String {
        if self.is_empty() {
            return "No leaks.\n".to_string();
        }

        let mut summary = String::from("Found leaks:\n");
        for (id, count) in self.ranked_listing() {
            summary.push_str(&format!(" {}x {}\n", count, id));
        }
        summary
    }

    /// Print the summary to stdout.
    pub fn print_summary(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.write_summary(&mut lock)?;
        lock.flush()?;
        Ok(())
    }

    pub fn to_document(&self) -> StatisticsDocument {
        StatisticsDocument {
            leaks_count_by_name: self
                .leaks_count_by_name
                .iter()
                .map(|(id, count)| (id.clone(), *count))
                .collect(),
        }
    }

    /// Write the totals to `path`.
    ///
    /// A `.json` extension selects pretty-printed JSON; any other path gets
    /// an XML property list.  The file is overwritten in place.
    pub fn save(&self, path: &Path) -> Result<()> {
        let document = self.to_document();

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            let json = serde_json::to_string_pretty(&document).map_err(|source| {
                LeakStatsError::JsonWrite {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            std::fs::write(path, json + "\n").map_err(|source| LeakStatsError::FileWrite {
                path: path.to_path_buf(),
                source,
            })
        } else {
            plist::to_file_xml(path, &document).map_err(|source| {
                LeakStatsError::StatisticsWrite {
                    path: path.to_path_buf(),
                    source,
                }
            })
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
