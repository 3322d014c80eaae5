//! Time helpers for the spot feed.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Format a spot timestamp as "HH:MM" in UTC.
///
/// The spot feed returns times in UTC but without a timezone suffix
/// (e.g. "2026-02-24T18:30:00"). A bare timestamp is therefore parsed as
/// already-UTC rather than local time.
pub fn format_spot_time_utc(spot_time: &str) -> String {
    let normalized = spot_time.replace(' ', "T");
    let parsed = DateTime::parse_from_rfc3339(&normalized)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        });
    match parsed {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => String::new(),
    }
}
