//! Immutable pipeline configuration.
//!
//! All knobs the aggregation pipeline consumes live here as plain values,
//! passed explicitly into the entry point rather than read from ambient
//! state, so the core stays pure and testable.

use std::collections::HashSet;

use crate::models::TimeRange;

/// Default cap on video length; longer entries are likely music streams
/// or podcasts and skew the statistics.
pub const DEFAULT_MAX_DURATION_MINUTES: i64 = 179;

/// Title the export writer substitutes for videos that are private or
/// have been removed. Such records carry no usable metadata.
pub const DEFAULT_UNAVAILABLE_MARKER: &str = "PRIVATE VIDEO";

/// Filler words removed from the keyword tables after accumulation.
pub const DEFAULT_STOP_WORDS: &[&str] = &["the", "of", "to", "how", "2", "3", "a", "is", "and"];

/// Default number of rows in each ranking table.
pub const DEFAULT_TOP_N: usize = 20;

/// Configuration consumed by the analysis pipeline.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Inclusive reporting window on `when_watched`.
    pub range: TimeRange,
    /// Collapse repeated watches of the same video to the first one.
    pub remove_duplicates: bool,
    /// Upper bound on `duration_seconds` for non-exempt channels.
    pub max_duration_seconds: i64,
    /// Channels that bypass the duration cap entirely, unparsed
    /// durations included.
    pub exempt_channels: HashSet<String>,
    /// Keywords dropped from both keyword frequency tables.
    pub stop_words: Vec<String>,
    /// Title marking an unavailable record; dropped before any counting.
    pub unavailable_marker: String,
    /// Rows per ranking table.
    pub top_n: usize,
}

impl AnalysisConfig {
    /// Configuration with the defaults above and the given window.
    pub fn new(range: TimeRange) -> Self {
        Self {
            range,
            remove_duplicates: true,
            max_duration_seconds: DEFAULT_MAX_DURATION_MINUTES * 60,
            exempt_channels: HashSet::new(),
            stop_words: DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
            unavailable_marker: DEFAULT_UNAVAILABLE_MARKER.to_string(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn any_range() -> TimeRange {
        TimeRange::new(
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::new(any_range());
        assert!(config.remove_duplicates);
        assert_eq!(config.max_duration_seconds, 179 * 60);
        assert!(config.exempt_channels.is_empty());
        assert_eq!(config.unavailable_marker, "PRIVATE VIDEO");
        assert_eq!(config.top_n, 20);
        assert!(config.stop_words.iter().any(|w| w == "the"));
    }

    #[test]
    fn test_config_is_plain_data() {
        let mut config = AnalysisConfig::new(any_range());
        config.exempt_channels.insert("LongChannel".to_string());
        config.remove_duplicates = false;
        let copy = config.clone();
        assert!(copy.exempt_channels.contains("LongChannel"));
        assert!(!copy.remove_duplicates);
    }
}
