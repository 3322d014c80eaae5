//! Aggregate read-models over the log. Both views are computed by grouping
//! at query time, never incrementally maintained, and return rows ascending
//! by date.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;

use crate::db::store::Store;
use crate::errors::{AppError, AppResult};

/// One date bucket of an aggregate view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCount {
    pub date: NaiveDate,
    pub count: i64,
}

/// Total QSOs per session date. The LEFT JOIN keeps sessions with no QSOs
/// in the result with count 0 instead of dropping the row.
pub(crate) const QSO_COUNTS_BY_DATE_SQL: &str = "
  SELECT hs.session_date, COUNT(q.id) as count
  FROM hunt_sessions hs
  LEFT JOIN qsos q ON q.hunt_session_id = hs.id
  GROUP BY hs.session_date
  ORDER BY hs.session_date";

/// Parks first worked per date: the inner query pins each park to the
/// MIN(session_date) it was ever logged on, the outer one counts parks per
/// first-worked date. NULL parks are excluded entirely.
pub(crate) const NEW_PARK_COUNTS_BY_DATE_SQL: &str = "
  SELECT first_date as session_date, COUNT(*) as count
  FROM (
    SELECT q.park_reference, MIN(hs.session_date) as first_date
    FROM qsos q
    JOIN hunt_sessions hs ON q.hunt_session_id = hs.id
    WHERE q.park_reference IS NOT NULL
    GROUP BY q.park_reference
  )
  GROUP BY first_date
  ORDER BY first_date";

pub fn qso_counts_by_date(store: &Store) -> AppResult<Vec<DateCount>> {
    collect_counts(&store.conn, QSO_COUNTS_BY_DATE_SQL)
}

pub fn new_park_counts_by_date(store: &Store) -> AppResult<Vec<DateCount>> {
    collect_counts(&store.conn, NEW_PARK_COUNTS_BY_DATE_SQL)
}

fn collect_counts(conn: &Connection, sql: &str) -> AppResult<Vec<DateCount>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (date_str, count) = r?;
        let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(date_str.clone()))?;
        out.push(DateCount { date, count });
    }
    Ok(out)
}
