//! Parser for the catalog service's compact duration notation.
//!
//! Durations arrive as ISO-8601 strings of the form `PT#H#M#S` where each
//! component is optional but always ordered hours, minutes, seconds.

/// Sentinel duration meaning "could not be parsed / unknown".
///
/// Downstream duration filters treat this as exceeding any length cap
/// unless the record's channel is explicitly exempted.
pub const UNKNOWN_DURATION: i64 = -1;

/// Convert a `PT#H#M#S` duration string into total seconds.
///
/// Each of the hours/minutes/seconds components may be absent. When hours
/// are present and minutes absent, the seconds component is read from the
/// text following the hours marker rather than a minutes marker.
///
/// Returns [`UNKNOWN_DURATION`] when the `PT` prefix is missing or any
/// component fails to parse as an integer. A bare `"PT"` is the empty
/// component subset and yields 0.
///
/// # Examples
///
/// ```
/// use watch_core::duration::{parse_duration_seconds, UNKNOWN_DURATION};
///
/// assert_eq!(parse_duration_seconds("PT1H2M3S"), 3723);
/// assert_eq!(parse_duration_seconds("PT4M20S"), 260);
/// assert_eq!(parse_duration_seconds("PT1H5S"), 3605);
/// assert_eq!(parse_duration_seconds("PT12H"), 43200);
/// assert_eq!(parse_duration_seconds("garbage"), UNKNOWN_DURATION);
/// ```
pub fn parse_duration_seconds(encoded: &str) -> i64 {
    let Some(t) = encoded.strip_prefix("PT") else {
        return UNKNOWN_DURATION;
    };

    let has_hours = t.contains('H');
    let has_minutes = t.contains('M');
    let has_seconds = t.contains('S');

    // Text after the last hours marker; the whole body when hours are absent.
    let after_hours = t.rsplit('H').next().unwrap_or(t);

    let hours = if has_hours {
        match t.split('H').next().unwrap_or("").parse::<i64>() {
            Ok(v) => v,
            Err(_) => return UNKNOWN_DURATION,
        }
    } else {
        0
    };

    let minutes = if has_minutes {
        match after_hours.split('M').next().unwrap_or("").parse::<i64>() {
            Ok(v) => v,
            Err(_) => return UNKNOWN_DURATION,
        }
    } else {
        0
    };

    let seconds = if has_seconds {
        // With hours but no minutes, seconds follow the hours marker.
        let source = if has_hours && !has_minutes {
            after_hours
        } else {
            t.rsplit('M').next().unwrap_or(t)
        };
        match source.split('S').next().unwrap_or("").parse::<i64>() {
            Ok(v) => v,
            Err(_) => return UNKNOWN_DURATION,
        }
    } else {
        0
    };

    hours * 3600 + minutes * 60 + seconds
}
