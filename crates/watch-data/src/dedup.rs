//! Duplicate-watch collapsing.
//!
//! Identifies repeated watches of the same video by `video_id` over a
//! chronologically sorted batch (sorting is the caller's job), keeping
//! the first-seen occurrence when removal is enabled and tracking how
//! often each video was rewatched.

use std::collections::{HashMap, HashSet};

use tracing::debug;
use watch_core::models::WatchRecord;
use watch_core::ranking::FrequencyMap;

/// Output of [`collapse_duplicates`].
#[derive(Debug, Clone, Default)]
pub struct DedupResult {
    /// The surviving sequence, input order preserved. With removal
    /// enabled each `video_id` appears once (its earliest occurrence,
    /// given sorted input); with removal disabled this is the full input.
    pub records: Vec<WatchRecord>,
    /// `video_id` -> a full record for that video, present only for
    /// videos that were actually duplicated. The stored instance is
    /// whichever occurrence bumped the duplicate count last, not the
    /// first one; consumers only need *some* instance for the key.
    pub representatives: HashMap<String, WatchRecord>,
    /// `video_id` -> occurrences beyond the first. A key absent here was
    /// never duplicated.
    pub extra_counts: FrequencyMap,
}

/// Collapse repeated watches keyed by `video_id`.
///
/// When `remove` is false the sequence passes through unchanged; the
/// representative and count maps are built either way.
pub fn collapse_duplicates(records: Vec<WatchRecord>, remove: bool) -> DedupResult {
    let input_len = records.len();
    let mut seen: HashSet<String> = HashSet::new();
    let mut result = DedupResult::default();

    for record in records {
        if seen.contains(&record.video_id) {
            result.extra_counts.increment(&record.video_id);
            result
                .representatives
                .insert(record.video_id.clone(), record.clone());
            if !remove {
                result.records.push(record);
            }
        } else {
            seen.insert(record.video_id.clone());
            result.records.push(record);
        }
    }

    debug!(
        "collapse_duplicates: {} -> {} records ({} rewatches, removal {})",
        input_len,
        result.records.len(),
        result.extra_counts.total(),
        if remove { "on" } else { "off" },
    );
    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────
