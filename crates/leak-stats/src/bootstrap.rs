use std::path::{Path, PathBuf};

use leak_core::error::{LeakStatsError, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name onto a `tracing` filter directive.
///
/// Unrecognised names are passed through lowercased.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" | "CRITICAL" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" => "error".to_string(),
        other => other.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Logs go to stderr; stdout is reserved for the leak summary.  Falls back
/// to `"info"` if the level cannot be turned into a filter.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()?;

    Ok(())
}

// ── Path resolution ────────────────────────────────────────────────────────────

/// Resolve `path` against `cwd`.  Absolute paths are returned unchanged.
pub fn resolve_path(path: &Path, cwd: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(LeakStatsError::InvalidPath(path.display().to_string()));
    }
    Ok(cwd.join(path))
}

/// Resolve `path` against the process working directory.
pub fn resolve_from_current_dir(path: &Path) -> Result<PathBuf> {
    let cwd = std::env::current_dir()
        .map_err(|_| LeakStatsError::InvalidPath(path.display().to_string()))?;
    resolve_path(path, &cwd)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
