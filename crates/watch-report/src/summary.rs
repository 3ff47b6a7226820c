//! Full-report console layout.
//!
//! Renders the pipeline's [`WatchReport`] as a header block, a scalar
//! summary, and one table per ranking category. Empty categories are
//! skipped; empty scalar derivations render as "no data".

use watch_core::config::AnalysisConfig;
use watch_core::formatting::{format_number, round2, seconds_to_hours};
use watch_core::models::AggregateEntry;
use watch_data::analysis::WatchReport;

use crate::table::{Column, ColumnRole, Table};

/// Render the complete report as a single printable string.
pub fn render_report(report: &WatchReport, config: &AnalysisConfig, color: bool) -> String {
    let mut out = String::new();

    // ── Header block ──────────────────────────────────────────────────────────
    out.push_str(&format!(
        "Stats cover the period from {} to {}\n",
        config.range.start().format("%Y-%m-%d"),
        config.range.end().format("%Y-%m-%d"),
    ));
    out.push_str(&format!(
        "Duplicate removal is {}\n",
        if config.remove_duplicates { "ON" } else { "OFF" },
    ));

    // ── Scalar summary ────────────────────────────────────────────────────────
    out.push_str(&format!("Total videos watched: {}\n", report.total_videos));

    let hours = round2(seconds_to_hours(report.total_seconds));
    match report.hours_per_day {
        Some(rate) => out.push_str(&format!(
            "Hours watched: {} (~{} hours per day)\n",
            format_number(hours, 2),
            format_number(round2(rate), 2),
        )),
        None => out.push_str(&format!("Hours watched: {}\n", format_number(hours, 2))),
    }

    match report.mean_video_seconds {
        Some(mean) => out.push_str(&format!(
            "Mean video length: {} minutes\n",
            format_number(round2(mean / 60.0), 2),
        )),
        None => out.push_str("Mean video length: no data\n"),
    }

    if report.total_videos == 0 {
        out.push_str("\nNo videos matched the configured filters.\n");
        return out;
    }

    // ── Ranking tables ────────────────────────────────────────────────────────
    push_table(
        &mut out,
        channel_table(
            "Most Watched (by video count)",
            &["Videos", "Time Watched (hr)"],
            &report.channels_by_count,
            |entry| vec![entry.count.to_string(), format_number(entry.hours(), 2)],
            color,
        ),
    );

    push_table(
        &mut out,
        channel_table(
            "Most Watched (by time)",
            &["Time Watched (hr)", "Videos"],
            &report.channels_by_time,
            |entry| vec![format_number(entry.hours(), 2), entry.count.to_string()],
            color,
        ),
    );

    push_table(&mut out, keyword_table("Tag Keyword", &report.tag_keywords, color));
    push_table(
        &mut out,
        keyword_table("Title Keyword", &report.title_keywords, color),
    );

    push_table(
        &mut out,
        channel_table(
            "Week",
            &["Videos", "Time Watched (hr)"],
            &report.weekly_activity,
            |entry| vec![entry.count.to_string(), format_number(entry.hours(), 2)],
            color,
        ),
    );

    let mut longest = Table::new(
        vec![
            Column::new("Longest video titles", ColumnRole::Label),
            Column::new("Duration (hr)", ColumnRole::Value),
            Column::new("Channel", ColumnRole::Context),
        ],
        color,
    );
    for video in &report.longest_videos {
        longest.push_row(vec![
            video.title.clone(),
            format_number(round2(seconds_to_hours(video.duration_seconds)), 2),
            video.channel.clone(),
        ]);
    }
    push_table(&mut out, longest);

    let mut shortest = Table::new(
        vec![
            Column::new("Shortest video titles", ColumnRole::Label),
            Column::new("Duration (sec)", ColumnRole::Value),
            Column::new("Channel", ColumnRole::Context),
        ],
        color,
    );
    for video in &report.shortest_videos {
        shortest.push_row(vec![
            video.title.clone(),
            video.duration_seconds.to_string(),
            video.channel.clone(),
        ]);
    }
    push_table(&mut out, shortest);

    let mut rewatched = Table::new(
        vec![
            Column::new("Most rewatched video titles", ColumnRole::Label),
            Column::new("Rewatches", ColumnRole::Value),
            Column::new("Channel", ColumnRole::Context),
        ],
        color,
    );
    for entry in &report.most_rewatched {
        rewatched.push_row(vec![
            entry.title.clone(),
            entry.extra_views.to_string(),
            entry.channel.clone(),
        ]);
    }
    push_table(&mut out, rewatched);

    out
}

// ── Table builders ────────────────────────────────────────────────────────────

/// Build a label + numeric-columns table from aggregate entries.
fn channel_table(
    label_header: &str,
    value_headers: &[&str],
    entries: &[AggregateEntry],
    cells: impl Fn(&AggregateEntry) -> Vec<String>,
    color: bool,
) -> Table {
    let mut columns = vec![Column::new(label_header, ColumnRole::Label)];
    for header in value_headers {
        columns.push(Column::new(header, ColumnRole::Value));
    }
    let mut table = Table::new(columns, color);
    for entry in entries {
        let mut row = vec![entry.label.clone()];
        row.extend(cells(entry));
        table.push_row(row);
    }
    table
}

/// Build a keyword-frequency table.
fn keyword_table(label_header: &str, keywords: &[(String, u64)], color: bool) -> Table {
    let mut table = Table::new(
        vec![
            Column::new(label_header, ColumnRole::Label),
            Column::new("Videos", ColumnRole::Value),
        ],
        color,
    );
    for (keyword, count) in keywords {
        table.push_row(vec![keyword.clone(), count.to_string()]);
    }
    table
}

/// Append a rendered table preceded by a blank line; empty tables are
/// skipped entirely.
fn push_table(out: &mut String, table: Table) {
    if table.is_empty() {
        return;
    }
    out.push('\n');
    out.push_str(&table.render());
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use watch_core::models::{RankedVideo, RewatchEntry, TimeRange};
    use watch_data::analysis::AnalysisMetadata;

    fn year_config() -> AnalysisConfig {
        let range = TimeRange::new(
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap(),
        )
        .unwrap();
        AnalysisConfig::new(range)
    }

    fn metadata() -> AnalysisMetadata {
        AnalysisMetadata {
            generated_at: "2024-01-01T00:00:00+00:00".to_string(),
            records_loaded: 3,
            unavailable_dropped: 0,
            outside_range_dropped: 0,
            over_duration_dropped: 0,
            duplicates_detected: 1,
            records_analyzed: 2,
            elapsed_seconds: 0.01,
        }
    }

    fn empty_report() -> WatchReport {
        WatchReport {
            total_videos: 0,
            total_seconds: 0,
            mean_video_seconds: None,
            hours_per_day: Some(0.0),
            channels_by_count: vec![],
            channels_by_time: vec![],
            tag_keywords: vec![],
            title_keywords: vec![],
            weekly_activity: vec![],
            longest_videos: vec![],
            shortest_videos: vec![],
            most_rewatched: vec![],
            metadata: metadata(),
        }
    }

    fn populated_report() -> WatchReport {
        WatchReport {
            total_videos: 2,
            total_seconds: 7200,
            mean_video_seconds: Some(3600.0),
            hours_per_day: Some(0.01),
            channels_by_count: vec![AggregateEntry {
                label: "A Channel".to_string(),
                count: 2,
                seconds: 7200,
            }],
            channels_by_time: vec![AggregateEntry {
                label: "A Channel".to_string(),
                count: 2,
                seconds: 7200,
            }],
            tag_keywords: vec![("speedrun".to_string(), 2)],
            title_keywords: vec![("rust".to_string(), 1)],
            weekly_activity: vec![AggregateEntry {
                label: "2023-W11".to_string(),
                count: 2,
                seconds: 7200,
            }],
            longest_videos: vec![RankedVideo {
                title: "Long video".to_string(),
                channel: "A Channel".to_string(),
                duration_seconds: 5400,
            }],
            shortest_videos: vec![RankedVideo {
                title: "Short video".to_string(),
                channel: "A Channel".to_string(),
                duration_seconds: 1800,
            }],
            most_rewatched: vec![RewatchEntry {
                title: "Rewatched video".to_string(),
                channel: "A Channel".to_string(),
                extra_views: 1,
            }],
            metadata: metadata(),
        }
    }

    // ── Populated reports ─────────────────────────────────────────────────────

    #[test]
    fn test_render_header_and_scalars() {
        let rendered = render_report(&populated_report(), &year_config(), false);
        assert!(rendered.contains("Stats cover the period from 2023-01-01 to 2023-12-31"));
        assert!(rendered.contains("Duplicate removal is ON"));
        assert!(rendered.contains("Total videos watched: 2"));
        assert!(rendered.contains("Hours watched: 2.00 (~0.01 hours per day)"));
        assert!(rendered.contains("Mean video length: 60.00 minutes"));
    }

    #[test]
    fn test_render_all_ranking_sections() {
        let rendered = render_report(&populated_report(), &year_config(), false);
        assert!(rendered.contains("Most Watched (by video count)"));
        assert!(rendered.contains("Most Watched (by time)"));
        assert!(rendered.contains("Tag Keyword"));
        assert!(rendered.contains("Title Keyword"));
        assert!(rendered.contains("Week"));
        assert!(rendered.contains("Longest video titles"));
        assert!(rendered.contains("Shortest video titles"));
        assert!(rendered.contains("Most rewatched video titles"));
        assert!(rendered.contains("speedrun"));
        assert!(rendered.contains("2023-W11"));
        assert!(rendered.contains("Rewatched video"));
    }

    #[test]
    fn test_render_duration_units() {
        let rendered = render_report(&populated_report(), &year_config(), false);
        // Longest in hours, shortest in raw seconds.
        assert!(rendered.contains("1.50"));
        assert!(rendered.contains("1800"));
    }

    #[test]
    fn test_render_duplicate_removal_off() {
        let mut config = year_config();
        config.remove_duplicates = false;
        let rendered = render_report(&populated_report(), &config, false);
        assert!(rendered.contains("Duplicate removal is OFF"));
    }

    // ── Empty reports ─────────────────────────────────────────────────────────

    #[test]
    fn test_render_empty_report_is_no_data() {
        let rendered = render_report(&empty_report(), &year_config(), false);
        assert!(rendered.contains("Total videos watched: 0"));
        assert!(rendered.contains("Mean video length: no data"));
        assert!(rendered.contains("No videos matched the configured filters."));
        assert!(!rendered.contains("Most Watched"));
    }

    #[test]
    fn test_render_missing_rate_omits_per_day_figure() {
        let mut report = empty_report();
        report.hours_per_day = None;
        let rendered = render_report(&report, &year_config(), false);
        assert!(rendered.contains("Hours watched: 0.00\n"));
        assert!(!rendered.contains("hours per day"));
    }

    // ── Coloring ──────────────────────────────────────────────────────────────

    #[test]
    fn test_color_toggle() {
        let plain = render_report(&populated_report(), &year_config(), false);
        let colored = render_report(&populated_report(), &year_config(), true);
        assert!(!plain.contains('\u{1b}'));
        assert!(colored.contains('\u{1b}'));
    }
}
