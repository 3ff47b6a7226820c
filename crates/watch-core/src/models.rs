use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WatchError};
use crate::formatting::round2;

/// One watched-video event from the history export, fully parsed.
///
/// Records are immutable once constructed: every pipeline stage consumes
/// an owned sequence and produces a new one rather than mutating in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchRecord {
    /// Video title as it appeared in the export.
    pub title: String,
    /// Stable external video identifier.
    pub video_id: String,
    /// Channel display name.
    pub channel: String,
    /// Stable external channel identifier.
    pub channel_id: String,
    /// UTC timestamp when the video was watched.
    pub when_watched: DateTime<Utc>,
    /// UTC timestamp when the video was published, when the enrichment
    /// step resolved it.
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
    /// Video length in seconds; `-1` means the duration string could not
    /// be parsed (see [`crate::duration::UNKNOWN_DURATION`]).
    pub duration_seconds: i64,
    /// Public view count at enrichment time; `-1` when unknown.
    #[serde(default)]
    pub view_count: i64,
    /// Uploader-assigned tags, in export order.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// An inclusive `[start, end]` timestamp window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeRange {
    /// Build a range, enforcing `start <= end`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if start > end {
            return Err(WatchError::InvalidTimeRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Inclusive start of the range.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// Inclusive end of the range.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `ts` falls within the range, bounds included.
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// Number of whole days spanned by the range.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// One row of a grouped ranking (per channel or per week bucket).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateEntry {
    /// Display label for the group (channel name, week key).
    pub label: String,
    /// Number of records in the group.
    pub count: u64,
    /// Summed watch seconds for the group.
    pub seconds: i64,
}

impl AggregateEntry {
    /// The summed seconds expressed in hours, rounded to 2 decimals.
    pub fn hours(&self) -> f64 {
        round2(self.seconds as f64 / 3600.0)
    }
}

/// One row of the longest/shortest-video rankings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedVideo {
    pub title: String,
    pub channel: String,
    pub duration_seconds: i64,
}

/// One row of the most-rewatched ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewatchEntry {
    pub title: String,
    pub channel: String,
    /// Occurrences beyond the first watch.
    pub extra_views: u64,
}
