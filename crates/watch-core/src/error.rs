use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by watchstats.
#[derive(Error, Debug)]
pub enum WatchError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A timestamp string did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A time range was given with its bounds reversed.
    #[error("Invalid time range: start {start} is after end {end}")]
    InvalidTimeRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// The expected export path does not exist.
    #[error("Export path not found: {0}")]
    DataPathNotFound(PathBuf),

    /// No JSON export files were found under the given directory.
    #[error("No export files found in {0}")]
    NoExportFiles(PathBuf),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the watchstats crates.
pub type Result<T> = std::result::Result<T, WatchError>;
