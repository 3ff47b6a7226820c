//! Grouped statistics over the filtered, deduplicated record batch.
//!
//! One pass accumulates per-channel, per-keyword and per-week figures
//! plus the duration totals; ranking views are derived afterwards with
//! stable, first-seen tie-breaking.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Datelike, Utc};
use regex::Regex;
use watch_core::models::{AggregateEntry, RankedVideo, RewatchEntry, WatchRecord};
use watch_core::ranking::FrequencyMap;

use crate::dedup::DedupResult;

/// Characters outside this class are stripped before title tokenization.
const TITLE_STRIP_PATTERN: &str = "[^a-z ]";

// ── WatchAggregates ───────────────────────────────────────────────────────────

/// Accumulated groupings for one record batch.
#[derive(Debug, Clone, Default)]
pub struct WatchAggregates {
    /// `channel_id` -> display name; the last-seen name wins when names
    /// diverge (no uniqueness is enforced).
    pub channel_names: HashMap<String, String>,
    /// Records per `channel_id`.
    pub channel_counts: FrequencyMap,
    /// Summed watch seconds per `channel_id`. The `-1` sentinel of
    /// duration-exempt channels is summed as-is so per-channel figures
    /// reconcile with the total.
    pub channel_seconds: HashMap<String, i64>,
    /// Keyword votes from tags; one vote per record per distinct token.
    pub tag_keywords: FrequencyMap,
    /// Keyword votes from normalized title words; same vote semantics.
    pub title_keywords: FrequencyMap,
    /// ISO-week key -> (records, seconds), ascending by key.
    weekly: BTreeMap<String, (u64, i64)>,
    /// Summed watch seconds over the whole batch.
    pub total_seconds: i64,
    /// Number of records accumulated.
    pub records_counted: usize,
}

/// Stateless helper that builds [`WatchAggregates`] from a record batch.
pub struct WatchAggregator;

impl WatchAggregator {
    /// Accumulate every grouping in one pass, then strip `stop_words`
    /// from both keyword tables (a no-op for words never counted).
    pub fn aggregate(records: &[WatchRecord], stop_words: &[String]) -> WatchAggregates {
        let strip = Regex::new(TITLE_STRIP_PATTERN).expect("strip pattern is valid");
        let mut agg = WatchAggregates::default();

        for record in records {
            agg.channel_names
                .insert(record.channel_id.clone(), record.channel.clone());
            agg.channel_counts.increment(&record.channel_id);
            *agg.channel_seconds
                .entry(record.channel_id.clone())
                .or_insert(0) += record.duration_seconds;

            // Set semantics: a token repeated within one record still
            // contributes a single vote for that record.
            for token in tag_tokens(&record.tags) {
                agg.tag_keywords.increment(&token);
            }
            for token in title_tokens(&record.title, &strip) {
                agg.title_keywords.increment(&token);
            }

            let bucket = agg
                .weekly
                .entry(iso_week_key(record.when_watched))
                .or_insert((0, 0));
            bucket.0 += 1;
            bucket.1 += record.duration_seconds;

            agg.total_seconds += record.duration_seconds;
            agg.records_counted += 1;
        }

        for word in stop_words {
            agg.tag_keywords.remove(word);
            agg.title_keywords.remove(word);
        }

        agg
    }
}

impl WatchAggregates {
    /// The `n` most-watched channels by record count, descending, ties
    /// broken by first appearance in the batch.
    pub fn top_channels_by_count(&self, n: usize) -> Vec<AggregateEntry> {
        self.channel_counts
            .most_common(n)
            .into_iter()
            .map(|(channel_id, count)| AggregateEntry {
                label: self.display_name(&channel_id),
                count,
                seconds: self.seconds_for(&channel_id),
            })
            .collect()
    }

    /// The `n` most-watched channels by summed watch time, descending,
    /// ties broken by first appearance in the batch.
    pub fn top_channels_by_time(&self, n: usize) -> Vec<AggregateEntry> {
        let mut entries: Vec<AggregateEntry> = self
            .channel_counts
            .keys()
            .map(|channel_id| AggregateEntry {
                label: self.display_name(channel_id),
                count: self.channel_counts.get(channel_id),
                seconds: self.seconds_for(channel_id),
            })
            .collect();
        entries.sort_by(|a, b| b.seconds.cmp(&a.seconds));
        entries.truncate(n);
        entries
    }

    /// Per-ISO-week activity, ascending by week key.
    pub fn weekly_activity(&self) -> Vec<AggregateEntry> {
        self.weekly
            .iter()
            .map(|(week, (count, seconds))| AggregateEntry {
                label: week.clone(),
                count: *count,
                seconds: *seconds,
            })
            .collect()
    }

    fn display_name(&self, channel_id: &str) -> String {
        self.channel_names
            .get(channel_id)
            .cloned()
            .unwrap_or_else(|| channel_id.to_string())
    }

    fn seconds_for(&self, channel_id: &str) -> i64 {
        self.channel_seconds.get(channel_id).copied().unwrap_or(0)
    }
}

// ── Ranking views over the record batch ───────────────────────────────────────

/// Project a record down to its ranking row.
fn to_ranked(record: &WatchRecord) -> RankedVideo {
    RankedVideo {
        title: record.title.clone(),
        channel: record.channel.clone(),
        duration_seconds: record.duration_seconds,
    }
}

/// The `n` longest videos, duration descending, input order on ties.
pub fn longest_videos(records: &[WatchRecord], n: usize) -> Vec<RankedVideo> {
    let mut by_duration: Vec<&WatchRecord> = records.iter().collect();
    by_duration.sort_by(|a, b| b.duration_seconds.cmp(&a.duration_seconds));
    by_duration.into_iter().take(n).map(to_ranked).collect()
}

/// The `n` shortest videos, duration ascending, input order on ties.
pub fn shortest_videos(records: &[WatchRecord], n: usize) -> Vec<RankedVideo> {
    let mut by_duration: Vec<&WatchRecord> = records.iter().collect();
    by_duration.sort_by_key(|r| r.duration_seconds);
    by_duration.into_iter().take(n).map(to_ranked).collect()
}

/// The `n` most-rewatched videos, by extra occurrences beyond the first,
/// drawing titles from the deduplicator's representative map.
pub fn most_rewatched(dedup: &DedupResult, n: usize) -> Vec<RewatchEntry> {
    dedup
        .extra_counts
        .most_common(n)
        .into_iter()
        .filter_map(|(video_id, extra_views)| {
            dedup.representatives.get(&video_id).map(|r| RewatchEntry {
                title: r.title.clone(),
                channel: r.channel.clone(),
                extra_views,
            })
        })
        .collect()
}

// ── Scalar derivations ────────────────────────────────────────────────────────

/// Mean record duration in seconds, `None` for an empty batch.
pub fn mean_seconds(total_seconds: i64, count: usize) -> Option<f64> {
    if count == 0 {
        return None;
    }
    Some(total_seconds as f64 / count as f64)
}

/// Watch hours per day over a window of `days` whole days, `None` when
/// the window spans no whole day.
pub fn hours_per_day(total_seconds: i64, days: i64) -> Option<f64> {
    if days <= 0 {
        return None;
    }
    Some(total_seconds as f64 / 3600.0 / days as f64)
}

// ── Tokenization ──────────────────────────────────────────────────────────────

/// Distinct lowercase tokens across all of a record's tags. Tags are
/// pre-segmented phrases, so they split on spaces without character
/// stripping.
fn tag_tokens(tags: &[String]) -> BTreeSet<String> {
    let mut tokens = BTreeSet::new();
    for tag in tags {
        for word in tag.to_lowercase().split(' ') {
            if !word.is_empty() {
                tokens.insert(word.to_string());
            }
        }
    }
    tokens
}

/// Distinct tokens of a normalized title: lowercased, stripped to
/// letters and spaces, split on spaces, empties dropped.
fn title_tokens(title: &str, strip: &Regex) -> BTreeSet<String> {
    let lowered = title.to_lowercase();
    let cleaned = strip.replace_all(&lowered, "");
    cleaned
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| word.to_string())
        .collect()
}

/// `"2023-W27"`-style ISO week bucket key.
fn iso_week_key(ts: DateTime<Utc>) -> String {
    let week = ts.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
