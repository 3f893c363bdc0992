use clap::error::{ContextKind, ErrorKind};
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::{LeakStatsError, Result};

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Aggregate leak counts from exported profiler traces
#[derive(Parser, Debug, Clone)]
#[command(
    name = "leak-stats",
    about = "Aggregate leak counts from exported profiler traces",
    version
)]
pub struct Settings {
    /// Folder with parsed trace files
    #[arg(allow_hyphen_values = true)]
    pub input_dir: PathBuf,

    /// Output file for statistics (`.json` writes JSON, anything else a plist)
    #[arg(allow_hyphen_values = true)]
    pub output_file: PathBuf,

    /// Only count leaks whose description names the report's application
    #[arg(long)]
    pub retain_only_app_name_leaks: bool,

    /// Logging level
    #[arg(long, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,
}

impl Settings {
    /// Parse the process arguments.
    pub fn load() -> Result<Self> {
        Self::load_from_args(std::env::args_os())
    }

    /// Parse an explicit argument list (the first item is the program name).
    ///
    /// `--help` and `--version` print and exit with status 0.  Every other
    /// parse failure is returned as [`LeakStatsError::Usage`].
    pub fn load_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Self::try_parse_from(args) {
            Ok(settings) => Ok(settings),
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.exit()
            }
            Err(e) => Err(LeakStatsError::Usage(describe_parse_error(&e))),
        }
    }

    /// One-line usage string, e.g. for printing next to an argument error.
    pub fn usage() -> String {
        Self::command().render_usage().to_string()
    }
}

/// Short description of a clap error without clap's own `error:` prefix.
fn describe_parse_error(e: &clap::Error) -> String {
    let detail = e.kind().as_str().unwrap_or("unrecognised command line");
    match e.get(ContextKind::InvalidArg) {
        Some(arg) => format!("{detail}: {arg}"),
        None => detail.to_string(),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
