/// Round to 2 decimal digits for display.
///
/// Internal accumulation stays in integer seconds; only values leaving
/// the core toward a report surface pass through here.
///
/// # Examples
///
/// ```
/// use watch_core::formatting::round2;
///
/// assert_eq!(round2(116.666_666), 116.67);
/// assert_eq!(round2(1.005), 1.01);
/// assert_eq!(round2(0.0), 0.0);
/// ```
pub fn round2(value: f64) -> f64 {
    // Nudge by half an ULP at the target precision before rounding to
    // avoid IEEE 754 binary-representation misses at exact midpoints.
    let scaled = value * 100.0;
    let epsilon = f64::EPSILON * scaled.abs();
    (scaled + epsilon.copysign(scaled)).round() / 100.0
}

/// Seconds expressed as fractional hours, unrounded.
pub fn seconds_to_hours(seconds: i64) -> f64 {
    seconds as f64 / 3600.0
}

/// Format a floating-point number with thousands separators and a fixed
/// number of decimal places.
///
/// # Examples
///
/// ```
/// use watch_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5, 1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // frac_str starts with "0."; keep only the decimal point onward.
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a duration in seconds as a compact human-readable string.
///
/// # Examples
///
/// ```
/// use watch_core::formatting::format_duration_compact;
///
/// assert_eq!(format_duration_compact(45), "45s");
/// assert_eq!(format_duration_compact(600), "10m");
/// assert_eq!(format_duration_compact(3723), "1h 2m");
/// assert_eq!(format_duration_compact(7200), "2h");
/// ```
pub fn format_duration_compact(seconds: i64) -> String {
    if seconds < 60 {
        return format!("{}s", seconds);
    }
    let total_mins = seconds / 60;
    if total_mins < 60 {
        return format!("{}m", total_mins);
    }
    let hours = total_mins / 60;
    let mins = total_mins % 60;
    if mins == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, mins)
    }
}

/// Insert `,` separators every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let chars: Vec<char> = digits.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── round2 ─────────────────────────────────────────────────────────────

    #[test]
    fn test_round2_repeating_fraction() {
        // 350 seconds over 3 videos.
        assert_eq!(round2(350.0 / 3.0), 116.67);
    }

    #[test]
    fn test_round2_negative() {
        assert_eq!(round2(-1.005), -1.01);
    }

    // ── seconds_to_hours ───────────────────────────────────────────────────

    #[test]
    fn test_seconds_to_hours() {
        assert!((seconds_to_hours(3600) - 1.0).abs() < f64::EPSILON);
        assert!((seconds_to_hours(5400) - 1.5).abs() < f64::EPSILON);
        assert_eq!(seconds_to_hours(0), 0.0);
    }

    // ── format_number ──────────────────────────────────────────────────────

    #[test]
    fn test_format_number_small() {
        assert_eq!(format_number(999.0, 0), "999");
    }

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(1_000.0, 0), "1,000");
        assert_eq!(format_number(1_234_567.89, 2), "1,234,567.89");
    }

    // ── format_duration_compact ────────────────────────────────────────────

    #[test]
    fn test_format_duration_compact_boundaries() {
        assert_eq!(format_duration_compact(0), "0s");
        assert_eq!(format_duration_compact(59), "59s");
        assert_eq!(format_duration_compact(60), "1m");
        assert_eq!(format_duration_compact(3599), "59m");
        assert_eq!(format_duration_compact(3600), "1h");
    }
}
