//! Calendar heatmap read-model: date-bucketed counts mapped to five display
//! intensities. The buckets are a display concern only, derived purely from
//! the count.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::db::DateCount;

/// Display intensity, 0 (empty) to 4 (hottest).
pub type Level = u8;

/// Bucket a general activity count: 0, 1-3, 4-9, 10-19, 20+.
pub fn activity_level(count: i64) -> Level {
    if count == 0 {
        0
    } else if count <= 3 {
        1
    } else if count <= 9 {
        2
    } else if count <= 19 {
        3
    } else {
        4
    }
}

/// Bucket a new-parks count. A handful of first-time parks in one day is
/// already a hot day: 0, 1, 2, 3, 4+.
pub fn new_park_level(count: i64) -> Level {
    if count == 0 {
        0
    } else if count == 1 {
        1
    } else if count == 2 {
        2
    } else if count == 3 {
        3
    } else {
        4
    }
}

/// One cell of the calendar heatmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub count: i64,
    pub level: Level,
}

/// Expand sparse per-date counts into a dense calendar running from the
/// earliest logged date through `today`, one entry per day, zero-count days
/// included. `rows` must already be ascending by date (the aggregate views
/// guarantee it).
pub fn build_calendar(
    rows: &[DateCount],
    today: NaiveDate,
    level: fn(i64) -> Level,
) -> Vec<DayActivity> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    let counts: HashMap<NaiveDate, i64> = rows.iter().map(|r| (r.date, r.count)).collect();

    let mut out = Vec::new();
    let mut cursor = first.date;
    while cursor <= today {
        let count = counts.get(&cursor).copied().unwrap_or(0);
        out.push(DayActivity {
            date: cursor,
            count,
            level: level(count),
        });
        let Some(next) = cursor.succ_opt() else { break };
        cursor = next;
    }
    out
}
