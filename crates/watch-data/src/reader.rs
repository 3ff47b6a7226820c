//! Export-document discovery and loading for watchstats.
//!
//! Reads the JSON exchange document produced by the export/enrichment
//! step and converts it into fully-typed [`WatchRecord`]s for the
//! pipeline. Timestamps are parsed here; the core never sees strings.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};
use watch_core::duration::UNKNOWN_DURATION;
use watch_core::error::{Result, WatchError};
use watch_core::models::WatchRecord;

// ── Raw document shape ────────────────────────────────────────────────────────

/// One record as it appears in the exchange document. Timestamps are
/// ISO-8601 strings; enrichment fields may be absent when the catalog
/// lookup produced nothing.
#[derive(Debug, Deserialize)]
struct RawWatchRecord {
    title: String,
    video_id: String,
    channel: String,
    channel_id: String,
    when_watched: String,
    #[serde(default)]
    published: String,
    #[serde(default = "unknown")]
    duration_seconds: i64,
    #[serde(default = "unknown")]
    view_count: i64,
    #[serde(default)]
    tags: Vec<String>,
}

fn unknown() -> i64 {
    UNKNOWN_DURATION
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Find all `.json` files recursively under `dir`, sorted by path.
pub fn find_export_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.exists() {
        warn!("Export path does not exist: {}", dir.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "json")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Load watch records from `path`.
///
/// `path` may be a single export document or a directory, in which case
/// every discovered `.json` file is loaded and merged in sorted-path
/// order (multiple Takeout exports side by side are common).
///
/// A record whose `when_watched` cannot be parsed is a fatal error: the
/// pipeline's timestamp invariant is established at this boundary.
pub fn load_export(path: &Path) -> Result<Vec<WatchRecord>> {
    if !path.exists() {
        return Err(WatchError::DataPathNotFound(path.to_path_buf()));
    }

    if path.is_dir() {
        let files = find_export_files(path);
        if files.is_empty() {
            return Err(WatchError::NoExportFiles(path.to_path_buf()));
        }
        let mut all = Vec::new();
        for file in &files {
            all.extend(load_records_file(file)?);
        }
        debug!(
            "Loaded {} records from {} export files",
            all.len(),
            files.len()
        );
        return Ok(all);
    }

    load_records_file(path)
}

/// Parse an ISO-8601 / RFC 3339 timestamp string into a UTC [`DateTime`].
///
/// Handles the common `Z`-suffix form and any fixed UTC offset.
/// Returns `None` for empty strings or unrecognised formats.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }

    // Replace a trailing 'Z' with '+00:00'.
    let normalised = if let Some(stripped) = s.strip_suffix('Z') {
        format!("{}+00:00", stripped)
    } else {
        s.to_string()
    };

    DateTime::parse_from_rfc3339(&normalised)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Load and map a single export document.
fn load_records_file(path: &Path) -> Result<Vec<WatchRecord>> {
    let content = std::fs::read_to_string(path).map_err(|source| WatchError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: Vec<RawWatchRecord> = serde_json::from_str(&content)?;

    let mut records = Vec::with_capacity(raw.len());
    for item in raw {
        records.push(map_record(item)?);
    }

    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Map a raw record to a [`WatchRecord`], parsing its timestamps.
///
/// An empty `published` string means the enrichment step resolved no
/// metadata and maps to `None`; a non-empty unparseable timestamp is an
/// error either way.
fn map_record(raw: RawWatchRecord) -> Result<WatchRecord> {
    let when_watched = parse_timestamp(&raw.when_watched)
        .ok_or_else(|| WatchError::TimestampParse(raw.when_watched.clone()))?;

    let published = if raw.published.is_empty() {
        None
    } else {
        Some(
            parse_timestamp(&raw.published)
                .ok_or_else(|| WatchError::TimestampParse(raw.published.clone()))?,
        )
    };

    Ok(WatchRecord {
        title: raw.title,
        video_id: raw.video_id,
        channel: raw.channel,
        channel_id: raw.channel_id,
        when_watched,
        published,
        duration_seconds: raw.duration_seconds,
        view_count: raw.view_count,
        tags: raw.tags,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_export(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", body).unwrap();
        path
    }

    fn sample_record(video_id: &str, watched: &str) -> serde_json::Value {
        serde_json::json!({
            "title": format!("Video {}", video_id),
            "video_id": video_id,
            "channel": "A Channel",
            "channel_id": "UC123",
            "when_watched": watched,
            "published": "2023-01-01T00:00:00+00:00",
            "duration_seconds": 300,
            "view_count": 1000,
            "tags": ["music"],
        })
    }

    fn export_body(records: &[serde_json::Value]) -> String {
        serde_json::Value::Array(records.to_vec()).to_string()
    }

    // ── parse_timestamp ───────────────────────────────────────────────────────

    #[test]
    fn test_parse_timestamp_with_offset() {
        let ts = parse_timestamp("2023-06-15T20:30:00-04:00").unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-06-16T00:30:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_z_suffix() {
        let ts = parse_timestamp("2023-06-15T20:30:00Z").unwrap();
        assert_eq!(ts.to_rfc3339(), "2023-06-15T20:30:00+00:00");
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("June 15th").is_none());
        assert!(parse_timestamp("2023-06-15").is_none());
    }

    // ── find_export_files ─────────────────────────────────────────────────────

    #[test]
    fn test_find_export_files_sorted() {
        let dir = TempDir::new().unwrap();
        write_export(dir.path(), "c.json", "[]");
        write_export(dir.path(), "a.json", "[]");
        write_export(dir.path(), "b.json", "[]");
        write_export(dir.path(), "notes.txt", "ignored");

        let files = find_export_files(dir.path());
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json", "c.json"]);
    }

    #[test]
    fn test_find_export_files_recursive() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("Takeout 2");
        std::fs::create_dir_all(&sub).unwrap();
        write_export(dir.path(), "root.json", "[]");
        write_export(&sub, "nested.json", "[]");

        assert_eq!(find_export_files(dir.path()).len(), 2);
    }

    #[test]
    fn test_find_export_files_nonexistent_path() {
        let files = find_export_files(Path::new("/tmp/does-not-exist-watchstats-test"));
        assert!(files.is_empty());
    }

    // ── load_export ───────────────────────────────────────────────────────────

    #[test]
    fn test_load_export_basic() {
        let dir = TempDir::new().unwrap();
        let body = export_body(&[
            sample_record("vid1", "2023-06-15T20:30:00-04:00"),
            sample_record("vid2", "2023-06-16T09:00:00-04:00"),
        ]);
        let path = write_export(dir.path(), "watch_history.json", &body);

        let records = load_export(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].video_id, "vid1");
        assert_eq!(records[0].duration_seconds, 300);
        assert!(records[0].published.is_some());
    }

    #[test]
    fn test_load_export_applies_enrichment_defaults() {
        let dir = TempDir::new().unwrap();
        // Only the export-parser fields are present; enrichment never ran.
        let body = r#"[{
            "title": "Bare video",
            "video_id": "bare1",
            "channel": "A Channel",
            "channel_id": "UC123",
            "when_watched": "2023-06-15T20:30:00Z"
        }]"#;
        let path = write_export(dir.path(), "watch_history.json", body);

        let records = load_export(&path).unwrap();
        assert_eq!(records[0].duration_seconds, UNKNOWN_DURATION);
        assert_eq!(records[0].view_count, -1);
        assert!(records[0].tags.is_empty());
        assert!(records[0].published.is_none());
    }

    #[test]
    fn test_load_export_empty_published_is_none() {
        let dir = TempDir::new().unwrap();
        let mut record = sample_record("vid1", "2023-06-15T20:30:00Z");
        record["published"] = serde_json::json!("");
        let path = write_export(dir.path(), "watch_history.json", &export_body(&[record]));

        let records = load_export(&path).unwrap();
        assert!(records[0].published.is_none());
    }

    #[test]
    fn test_load_export_malformed_when_watched_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut record = sample_record("vid1", "2023-06-15T20:30:00Z");
        record["when_watched"] = serde_json::json!("yesterday");
        let path = write_export(dir.path(), "watch_history.json", &export_body(&[record]));

        let err = load_export(&path).unwrap_err();
        assert!(matches!(err, WatchError::TimestampParse(_)));
    }

    #[test]
    fn test_load_export_malformed_json_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write_export(dir.path(), "watch_history.json", "[{broken");

        let err = load_export(&path).unwrap_err();
        assert!(matches!(err, WatchError::JsonParse(_)));
    }

    #[test]
    fn test_load_export_missing_path() {
        let err = load_export(Path::new("/tmp/missing-watchstats-export.json")).unwrap_err();
        assert!(matches!(err, WatchError::DataPathNotFound(_)));
    }

    #[test]
    fn test_load_export_directory_merges_files() {
        let dir = TempDir::new().unwrap();
        write_export(
            dir.path(),
            "a.json",
            &export_body(&[sample_record("vid1", "2023-06-15T20:30:00Z")]),
        );
        write_export(
            dir.path(),
            "b.json",
            &export_body(&[sample_record("vid2", "2023-06-16T20:30:00Z")]),
        );

        let records = load_export(dir.path()).unwrap();
        assert_eq!(records.len(), 2);
        // Sorted-path order: a.json first.
        assert_eq!(records[0].video_id, "vid1");
        assert_eq!(records[1].video_id, "vid2");
    }

    #[test]
    fn test_load_export_empty_directory() {
        let dir = TempDir::new().unwrap();
        let err = load_export(dir.path()).unwrap_err();
        assert!(matches!(err, WatchError::NoExportFiles(_)));
    }
}
