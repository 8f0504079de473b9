//! Burn-in timer math: duration validation, end-time computation, and
//! human-readable remaining-time formatting for operator alerts.

use chrono::Duration;

use crate::types::Timestamp;

/// Longest accepted burn-in: 24 hours, in whole minutes.
pub const MAX_BURN_MINUTES: i64 = 24 * 60;

/// Validate a requested burn duration.
///
/// Accepts whole minutes in `1..=1440`; anything else (zero, negative,
/// over 24 hours) is rejected with `None` and the caller skips the
/// operation.
pub fn validate_minutes(minutes: i64) -> Option<i32> {
    if (1..=MAX_BURN_MINUTES).contains(&minutes) {
        Some(minutes as i32)
    } else {
        None
    }
}

/// Compute the burn-in end time: `started_at + minutes`.
pub fn ends_at(started_at: Timestamp, minutes: i32) -> Timestamp {
    started_at + Duration::minutes(i64::from(minutes))
}

/// Format a duration for operator messages: non-zero units from days down
/// to seconds, space-joined, singular/plural correct.
///
/// Sub-second (or negative) input floors to `"0 seconds"`.
///
/// # Examples
///
/// ```
/// use chrono::Duration;
/// use burnrack_core::burn::humanize_duration;
///
/// assert_eq!(humanize_duration(Duration::minutes(90)), "1 hour 30 minutes");
/// assert_eq!(humanize_duration(Duration::seconds(45)), "45 seconds");
/// ```
pub fn humanize_duration(duration: Duration) -> String {
    let total_secs = duration.num_seconds().max(0);

    let days = total_secs / 86_400;
    let hours = (total_secs % 86_400) / 3_600;
    let minutes = (total_secs % 3_600) / 60;
    let seconds = total_secs % 60;

    let mut parts = Vec::new();
    for (value, unit) in [
        (days, "day"),
        (hours, "hour"),
        (minutes, "minute"),
        (seconds, "second"),
    ] {
        if value > 0 {
            let plural = if value == 1 { "" } else { "s" };
            parts.push(format!("{value} {unit}{plural}"));
        }
    }

    if parts.is_empty() {
        return "0 seconds".to_string();
    }
    parts.join(" ")
}
