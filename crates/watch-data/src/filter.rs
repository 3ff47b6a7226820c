//! Record filters.
//!
//! A pipeline of order-preserving, side-effect-free passes over the
//! record batch. Each pass consumes the sequence and returns a new one;
//! relative ordering of the survivors never changes, so applying a pass
//! twice yields the same output as applying it once.

use std::collections::HashSet;

use tracing::debug;
use watch_core::models::{TimeRange, WatchRecord};

/// Drop records whose title equals the configured unavailable-marker.
///
/// Such records carry no usable metadata and are excluded entirely; they
/// never appear in any count.
pub fn drop_unavailable(records: Vec<WatchRecord>, marker: &str) -> Vec<WatchRecord> {
    let before = records.len();
    let kept: Vec<WatchRecord> = records.into_iter().filter(|r| r.title != marker).collect();
    debug!("drop_unavailable: {} -> {} records", before, kept.len());
    kept
}

/// Keep records whose `when_watched` falls inside `range`, bounds
/// included.
pub fn retain_in_range(records: Vec<WatchRecord>, range: &TimeRange) -> Vec<WatchRecord> {
    let before = records.len();
    let kept: Vec<WatchRecord> = records
        .into_iter()
        .filter(|r| range.contains(r.when_watched))
        .collect();
    debug!("retain_in_range: {} -> {} records", before, kept.len());
    kept
}

/// Keep records whose duration is within `[0, max_seconds]`, or whose
/// channel is exempt from the cap.
///
/// Exempt channels pass unconditionally, the unparsed `-1` sentinel
/// included; for everyone else the sentinel fails the lower bound and is
/// dropped.
pub fn retain_within_duration(
    records: Vec<WatchRecord>,
    max_seconds: i64,
    exempt: &HashSet<String>,
) -> Vec<WatchRecord> {
    let before = records.len();
    let kept: Vec<WatchRecord> = records
        .into_iter()
        .filter(|r| {
            (0..=max_seconds).contains(&r.duration_seconds) || exempt.contains(&r.channel)
        })
        .collect();
    debug!(
        "retain_within_duration: {} -> {} records",
        before,
        kept.len()
    );
    kept
}

/// Stable chronological sort by `when_watched`.
///
/// Establishes the Deduplicator's precondition; records watched at the
/// same instant keep their input order.
pub fn sort_by_watch_time(records: &mut [WatchRecord]) {
    records.sort_by_key(|r| r.when_watched);
}

// ── Tests ─────────────────────────────────────────────────────────────────────
