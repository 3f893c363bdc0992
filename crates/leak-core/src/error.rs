use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors produced by leak-stats.
///
/// Malformed records, files and filenames are not errors: they are dropped
/// from the batch and never surface here.
#[derive(Error, Debug)]
pub enum LeakStatsError {
    /// The input directory could not be listed.
    #[error("Failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The statistics property list could not be written.
    #[error("Failed to write statistics to {path}: {source}")]
    StatisticsWrite {
        path: PathBuf,
        #[source]
        source: plist::Error,
    },

    /// The statistics file could not be created or written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The statistics document could not be encoded as JSON.
    #[error("Failed to encode statistics for {path}: {source}")]
    JsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A path argument could not be turned into an absolute path.
    #[error("Invalid path \"{0}\"")]
    InvalidPath(String),

    /// The command line did not match the expected shape.
    #[error("Invalid arguments: {0}")]
    Usage(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the leak-stats crates.
pub type Result<T> = std::result::Result<T, LeakStatsError>;
