use chrono::{DateTime, Local};

/// Root key under which the profiler stores its leak entries.
pub const LEAKS_COLLECTION_KEY: &str = "com.apple.xray.instrument-type.homeleaks";

/// Token the profiler inserts into descriptions of Swift objects.
pub const LANGUAGE_MARKER_TOKEN: &str = "Swift";

/// A single leak entry decoded from a profiler report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeakRecord {
    /// Class or symbol name of the leaked allocation.
    pub name: String,
    /// Profiler-supplied description; preferred over `name` for identity.
    pub description: String,
    pub debug_description: String,
    /// Formatted pointer, e.g. `"0x600000c8d200"`.
    pub display_address: String,
    /// Part of a reference cycle.
    pub is_cycle: bool,
    /// Topmost object of a leaked graph.
    pub is_root_leak: bool,
    /// Seconds since the profiler's epoch.
    pub allocation_timestamp: i64,
    /// Number of leaked instances folded into this entry.
    pub count: i64,
    /// Size in bytes.
    pub size: i64,
    /// Best guess at the application symbol mentioned in `description`.
    pub possible_app_name: Option<String>,
}

impl LeakRecord {
    /// Aggregation key: `description` when non-empty, otherwise `name`.
    pub fn id(&self) -> &str {
        if self.description.is_empty() {
            &self.name
        } else {
            &self.description
        }
    }
}

/// All leaks recorded in one profiler export.
#[derive(Debug, Clone)]
pub struct Report {
    /// First component of the report filename.
    pub app_name: String,
    /// Timestamp parsed from the second filename component.
    pub created_at: DateTime<Local>,
    pub leaks: Vec<LeakRecord>,
}

/// A decoded property-list file paired with its filename.
#[derive(Debug, Clone)]
pub struct PropertyFile {
    pub filename: String,
    pub dict: plist::Dictionary,
}
