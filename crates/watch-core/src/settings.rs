use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

use crate::config::AnalysisConfig;
use crate::error::{Result, WatchError};
use crate::models::TimeRange;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Watch-history statistics from a video history export
#[derive(Parser, Debug, Clone)]
#[command(
    name = "watchstats",
    about = "Watch-history statistics from a video history export",
    version
)]
pub struct Settings {
    /// Path to watch_history.json, or a directory of exports
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Start of the reporting window (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub from: String,

    /// End of the reporting window (YYYY-MM-DD, whole day included)
    #[arg(long, value_name = "DATE")]
    pub to: String,

    /// Keep repeated watches of the same video instead of collapsing them
    #[arg(long)]
    pub keep_duplicates: bool,

    /// Exclude videos longer than this many minutes
    #[arg(long, default_value = "179", value_name = "MINUTES")]
    pub max_minutes: i64,

    /// Channel exempt from the duration cap (repeatable)
    #[arg(long = "exempt-channel", value_name = "CHANNEL")]
    pub exempt_channels: Vec<String>,

    /// Keyword dropped from the keyword tables (repeatable; replaces the
    /// built-in list when given)
    #[arg(long = "stop-word", value_name = "WORD")]
    pub stop_words: Vec<String>,

    /// Title marking an unavailable or private video in the export
    #[arg(long, default_value = "PRIVATE VIDEO", value_name = "TITLE")]
    pub unavailable_marker: String,

    /// Number of rows shown in each ranking table
    #[arg(long, default_value = "20")]
    pub top: usize,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Settings {
    /// The inclusive reporting window derived from `--from` / `--to`.
    ///
    /// The end date is extended to 23:59:59 so the whole final day falls
    /// inside the range.
    pub fn time_range(&self) -> Result<TimeRange> {
        let start = parse_date(&self.from)?
            .and_hms_opt(0, 0, 0)
            .expect("midnight is a valid wall-clock time")
            .and_utc();
        let end = parse_date(&self.to)?
            .and_hms_opt(23, 59, 59)
            .expect("23:59:59 is a valid wall-clock time")
            .and_utc();
        TimeRange::new(start, end)
    }

    /// Convert the CLI surface into the immutable pipeline configuration.
    pub fn to_config(&self) -> Result<AnalysisConfig> {
        if self.max_minutes < 0 {
            return Err(WatchError::Config(format!(
                "--max-minutes must be non-negative, got {}",
                self.max_minutes
            )));
        }

        let mut config = AnalysisConfig::new(self.time_range()?);
        config.remove_duplicates = !self.keep_duplicates;
        config.max_duration_seconds = self.max_minutes * 60;
        config.exempt_channels = self.exempt_channels.iter().cloned().collect();
        if !self.stop_words.is_empty() {
            config.stop_words = self.stop_words.clone();
        }
        config.unavailable_marker = self.unavailable_marker.clone();
        config.top_n = self.top;
        Ok(config)
    }
}

/// Parse a `YYYY-MM-DD` date argument.
fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        WatchError::Config(format!("invalid date \"{value}\", expected YYYY-MM-DD"))
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
