use std::sync::LazyLock;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use regex::Regex;
use tracing::debug;

/// `strftime` pattern for the `yyyyMMddHHmmss` filename timestamp.
pub const REPORT_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

static REPORT_TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{14}$").expect("regex is valid"));

/// Parse the timestamp component of a report filename.
///
/// The value carries no offset, so it is interpreted in the local timezone.
/// Returns `None` unless `s` is exactly fourteen digits forming a valid
/// calendar date and time.  When a DST transition makes the local time
/// ambiguous the earlier instant is used.
pub fn parse_report_timestamp(s: &str) -> Option<DateTime<Local>> {
    if !REPORT_TIMESTAMP_RE.is_match(s) {
        debug!("Report timestamp \"{}\" is not 14 digits", s);
        return None;
    }

    let naive = match NaiveDateTime::parse_from_str(s, REPORT_TIMESTAMP_FORMAT) {
        Ok(naive) => naive,
        Err(e) => {
            debug!("Could not parse report timestamp \"{}\": {}", s, e);
            return None;
        }
    };

    Local.from_local_datetime(&naive).earliest()
}
