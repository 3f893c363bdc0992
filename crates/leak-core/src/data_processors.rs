use plist::{Dictionary, Value};

use crate::models::{LeakRecord, LANGUAGE_MARKER_TOKEN};

// ── RecordDecoder ─────────────────────────────────────────────────────────────

/// Turns one raw leak dictionary from a profiler export into a [`LeakRecord`].
pub struct RecordDecoder;

impl RecordDecoder {
    /// Decode `dict` into a [`LeakRecord`].
    ///
    /// Every field is required and must carry its exact property-list type
    /// (string, boolean or integer), and `count` must be at least 1.  A
    /// missing or mistyped field yields `None`; the profiler emits a handful
    /// of such entries and they are simply skipped.
    pub fn decode(dict: &Dictionary) -> Option<LeakRecord> {
        let name = Self::string(dict, "name")?;
        let description = Self::string(dict, "description")?;
        let debug_description = Self::string(dict, "debugDescription")?;
        let display_address = Self::string(dict, "displayAddress")?;
        let is_cycle = Self::boolean(dict, "isCycle")?;
        let is_root_leak = Self::boolean(dict, "isRootLeak")?;
        let allocation_timestamp = Self::integer(dict, "allocationTimestamp")?;
        let count = Self::integer(dict, "count").filter(|count| *count >= 1)?;
        let size = Self::integer(dict, "size")?;

        let possible_app_name = AppNameExtractor::extract(&description, &name);

        Some(LeakRecord {
            name,
            description,
            debug_description,
            display_address,
            is_cycle,
            is_root_leak,
            allocation_timestamp,
            count,
            size,
            possible_app_name: Some(possible_app_name),
        })
    }

    fn string(dict: &Dictionary, key: &str) -> Option<String> {
        dict.get(key).and_then(Value::as_string).map(str::to_string)
    }

    fn boolean(dict: &Dictionary, key: &str) -> Option<bool> {
        dict.get(key).and_then(Value::as_boolean)
    }

    fn integer(dict: &Dictionary, key: &str) -> Option<i64> {
        dict.get(key).and_then(Value::as_signed_integer)
    }
}

// ── AppNameExtractor ──────────────────────────────────────────────────────────

/// Guesses which application symbol a leak description refers to.
pub struct AppNameExtractor;

impl AppNameExtractor {
    /// Split `description` on single spaces and drop empty tokens, tokens
    /// equal to `name`, and the `"Swift"` marker; rejoin what is left.
    ///
    /// ```
    /// use leak_core::data_processors::AppNameExtractor;
    ///
    /// assert_eq!(AppNameExtractor::extract("MyApp Swift Foo", "Foo"), "MyApp");
    /// assert_eq!(AppNameExtractor::extract("", "Foo"), "");
    /// ```
    pub fn extract(description: &str, name: &str) -> String {
        description
            .split(' ')
            .filter(|token| {
                !token.is_empty() && *token != name && *token != LANGUAGE_MARKER_TOKEN
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
