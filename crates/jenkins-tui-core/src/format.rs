//! Human-readable durations, timestamps and relative times
//!
//! All functions are pure; "now" is always passed in so callers control
//! the clock and rendering stays deterministic.

use chrono::{DateTime, Local, Utc};

/// Format a duration given in milliseconds
///
/// Sub-second durations read "Less than a second"; otherwise the largest
/// non-zero unit leads: `5s`, `2m 3s`, `1h 2m 3s`.
pub fn format_duration(millis: i64) -> String {
    let total_secs = millis / 1000;
    if total_secs < 1 {
        return "Less than a second".to_string();
    }

    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Format an epoch-millisecond timestamp in local time
pub fn format_timestamp(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis).map_or_else(
        || "unknown".to_string(),
        |at| {
            at.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        },
    )
}

/// Relative time between `then` and `now`, e.g. "3 hours ago"
pub fn format_time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);

    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "just now".to_string()
    } else if hours < 1 {
        plural(minutes, "minute")
    } else if days < 1 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else if days < 30 {
        plural(days / 7, "week")
    } else {
        plural(days / 30, "month")
    }
}

/// Relative time for an epoch-millisecond timestamp
pub fn format_millis_ago(millis: i64, now: DateTime<Utc>) -> String {
    DateTime::from_timestamp_millis(millis)
        .map_or_else(|| "unknown".to_string(), |then| format_time_ago(then, now))
}

/// Shorten `text` to at most `max` characters, ending in "..." when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
