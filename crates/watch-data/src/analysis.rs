//! Top-level analysis pipeline for watchstats.
//!
//! Runs filtering, sorting, duplicate collapse and aggregation over a
//! loaded record batch, returning a [`WatchReport`] ready for the
//! reporting layer.

use std::time::Instant;

use chrono::Utc;
use tracing::info;
use watch_core::config::AnalysisConfig;
use watch_core::models::{AggregateEntry, RankedVideo, RewatchEntry, WatchRecord};

use crate::aggregator::{self, WatchAggregator};
use crate::dedup::collapse_duplicates;
use crate::filter;

// ── Public types ──────────────────────────────────────────────────────────────

/// Stage-by-stage accounting produced alongside the report.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this report was generated.
    pub generated_at: String,
    /// Records handed to the pipeline.
    pub records_loaded: usize,
    /// Records dropped for carrying the unavailable-marker title.
    pub unavailable_dropped: usize,
    /// Records dropped for falling outside the reporting window.
    pub outside_range_dropped: usize,
    /// Records dropped by the duration cap.
    pub over_duration_dropped: usize,
    /// Duplicate occurrences observed beyond each video's first watch.
    pub duplicates_detected: usize,
    /// Records that reached the aggregation pass.
    pub records_analyzed: usize,
    /// Wall-clock seconds spent in the pipeline.
    pub elapsed_seconds: f64,
}

/// The complete output of [`analyze_records`] - every ranking sequence,
/// the scalar summaries, and the run metadata. This is the reporting
/// layer's entire input contract; nothing here carries formatting.
#[derive(Debug, Clone)]
pub struct WatchReport {
    /// Records counted after all filtering and deduplication.
    pub total_videos: usize,
    /// Summed watch seconds over the counted records.
    pub total_seconds: i64,
    /// Mean record duration in seconds; `None` when nothing survived.
    pub mean_video_seconds: Option<f64>,
    /// Watch hours per day over the configured window; `None` when the
    /// window spans no whole day.
    pub hours_per_day: Option<f64>,
    pub channels_by_count: Vec<AggregateEntry>,
    pub channels_by_time: Vec<AggregateEntry>,
    pub tag_keywords: Vec<(String, u64)>,
    pub title_keywords: Vec<(String, u64)>,
    pub weekly_activity: Vec<AggregateEntry>,
    pub longest_videos: Vec<RankedVideo>,
    pub shortest_videos: Vec<RankedVideo>,
    pub most_rewatched: Vec<RewatchEntry>,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline over a loaded record batch.
///
/// 1. Drop unavailable records, then records outside the window.
/// 2. Sort chronologically (the deduplicator's precondition).
/// 3. Apply the duration cap with channel exemptions.
/// 4. Collapse duplicate watches.
/// 5. Aggregate and derive the ranking views.
pub fn analyze_records(records: Vec<WatchRecord>, config: &AnalysisConfig) -> WatchReport {
    let started = Instant::now();
    let records_loaded = records.len();

    // ── Step 1: availability and window filters ───────────────────────────────
    let records = filter::drop_unavailable(records, &config.unavailable_marker);
    let unavailable_dropped = records_loaded - records.len();

    let before_range = records.len();
    let mut records = filter::retain_in_range(records, &config.range);
    let outside_range_dropped = before_range - records.len();

    // ── Step 2: chronological order ───────────────────────────────────────────
    filter::sort_by_watch_time(&mut records);

    // ── Step 3: duration cap ──────────────────────────────────────────────────
    let before_duration = records.len();
    let records = filter::retain_within_duration(
        records,
        config.max_duration_seconds,
        &config.exempt_channels,
    );
    let over_duration_dropped = before_duration - records.len();

    // ── Step 4: duplicate collapse ────────────────────────────────────────────
    let dedup = collapse_duplicates(records, config.remove_duplicates);
    let duplicates_detected = dedup.extra_counts.total() as usize;

    // ── Step 5: aggregate and rank ────────────────────────────────────────────
    let agg = WatchAggregator::aggregate(&dedup.records, &config.stop_words);
    let n = config.top_n;

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        records_loaded,
        unavailable_dropped,
        outside_range_dropped,
        over_duration_dropped,
        duplicates_detected,
        records_analyzed: dedup.records.len(),
        elapsed_seconds: started.elapsed().as_secs_f64(),
    };

    info!(
        "Analyzed {} of {} records ({} rewatches)",
        metadata.records_analyzed, records_loaded, duplicates_detected
    );

    WatchReport {
        total_videos: agg.records_counted,
        total_seconds: agg.total_seconds,
        mean_video_seconds: aggregator::mean_seconds(agg.total_seconds, agg.records_counted),
        hours_per_day: aggregator::hours_per_day(agg.total_seconds, config.range.num_days()),
        channels_by_count: agg.top_channels_by_count(n),
        channels_by_time: agg.top_channels_by_time(n),
        tag_keywords: agg.tag_keywords.most_common(n),
        title_keywords: agg.title_keywords.most_common(n),
        weekly_activity: agg.weekly_activity(),
        longest_videos: aggregator::longest_videos(&dedup.records, n),
        shortest_videos: aggregator::shortest_videos(&dedup.records, n),
        most_rewatched: aggregator::most_rewatched(&dedup, n),
        metadata,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
