//! Synchronous CRUD and query surface over the two tables.
//!
//! A `Store` owns the only SQLite connection and runs on the writer thread
//! managed by `db::handle`; everything else goes through the async
//! `StoreHandle`.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::db::initialize::init_db;
use crate::errors::{AppError, AppResult};
use crate::models::{HuntSession, InsertOutcome, Qso};

pub struct Store {
    pub(crate) conn: Connection,
}

pub(crate) fn row_to_session(row: &Row) -> rusqlite::Result<HuntSession> {
    let date_str: String = row.get("session_date")?;
    let session_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(HuntSession {
        id: row.get("id")?,
        session_date,
        created_at: row.get("created_at")?,
    })
}

pub(crate) fn row_to_qso(row: &Row) -> rusqlite::Result<Qso> {
    Ok(Qso {
        id: row.get("id")?,
        hunt_session_id: row.get("hunt_session_id")?,
        park_reference: row.get("park_reference")?,
        callsign: row.get("callsign")?,
        frequency: row.get("frequency")?,
        band: row.get("band")?,
        mode: row.get("mode")?,
        rst_sent: row.get("rst_sent")?,
        rst_received: row.get("rst_received")?,
        timestamp: row.get("timestamp")?,
        created_at: row.get("created_at")?,
        synced: row.get::<_, i32>("synced")? == 1,
    })
}

/// The duplicate-key rejection surfaces from SQLite as a UNIQUE constraint
/// failure; every other constraint (e.g. the session foreign key) stays an
/// error.
fn is_unique_violation(e: &rusqlite::Error) -> bool {
    match e {
        rusqlite::Error::SqliteFailure(err, Some(msg)) => {
            err.code == rusqlite::ErrorCode::ConstraintViolation
                && msg.contains("UNIQUE constraint failed")
        }
        _ => false,
    }
}

impl Store {
    pub fn open(path: &str) -> AppResult<Self> {
        let conn = Connection::open(path)?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        init_db(&conn)?;
        Ok(Self { conn })
    }

    /// Retrieve the session for a calendar date. Absence is not an error.
    pub fn session_by_date(&self, date: NaiveDate) -> AppResult<Option<HuntSession>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, session_date, created_at FROM hunt_sessions WHERE session_date = ?1",
        )?;
        let session = stmt
            .query_row([date.format("%Y-%m-%d").to_string()], row_to_session)
            .optional()?;
        Ok(session)
    }

    pub fn session_by_id(&self, id: &str) -> AppResult<Option<HuntSession>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT id, session_date, created_at FROM hunt_sessions WHERE id = ?1",
        )?;
        let session = stmt.query_row([id], row_to_session).optional()?;
        Ok(session)
    }

    /// Create the session for its date, or return the one that already
    /// exists. INSERT OR IGNORE keys on the date uniqueness, so two racing
    /// creates still end up with a single row; the re-select returns
    /// whichever row won.
    pub fn create_session(&self, session: &HuntSession) -> AppResult<HuntSession> {
        self.conn.execute(
            "INSERT OR IGNORE INTO hunt_sessions (id, session_date, created_at) VALUES (?1, ?2, ?3)",
            params![session.id, session.date_str(), session.created_at],
        )?;
        self.session_by_date(session.session_date)?.ok_or_else(|| {
            AppError::Other(format!(
                "session for {} missing after insert",
                session.date_str()
            ))
        })
    }

    /// Insert a QSO. A violation of the (session, callsign, park, band)
    /// uniqueness is reported as `Duplicate`, leaving the store unchanged;
    /// any other failure propagates.
    pub fn insert_qso(&self, qso: &Qso) -> AppResult<InsertOutcome> {
        let res = self.conn.execute(
            "INSERT INTO qsos
                (id, hunt_session_id, park_reference, callsign, frequency, band, mode,
                 rst_sent, rst_received, timestamp, created_at, synced)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 0)",
            params![
                qso.id,
                qso.hunt_session_id,
                qso.park_reference,
                qso.callsign,
                qso.frequency,
                qso.band,
                qso.mode,
                qso.rst_sent,
                qso.rst_received,
                qso.timestamp,
                qso.created_at,
            ],
        );
        match res {
            Ok(_) => Ok(InsertOutcome::Inserted { id: qso.id.clone() }),
            Err(e) if is_unique_violation(&e) => Ok(InsertOutcome::Duplicate),
            Err(e) => Err(e.into()),
        }
    }

    /// Unconditional delete; an absent id is a no-op.
    pub fn delete_qso(&self, id: &str) -> AppResult<()> {
        self.conn
            .execute("DELETE FROM qsos WHERE id = ?1", [id])?;
        Ok(())
    }

    pub fn qsos_for_session(&self, session_id: &str) -> AppResult<Vec<Qso>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT * FROM qsos WHERE hunt_session_id = ?1 ORDER BY timestamp DESC",
        )?;
        let rows = stmt.query_map([session_id], row_to_qso)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// All contacts with a station, newest first ("worked before" prompt).
    pub fn qsos_for_callsign(&self, callsign: &str) -> AppResult<Vec<Qso>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT * FROM qsos WHERE callsign = ?1 ORDER BY timestamp DESC")?;
        let rows = stmt.query_map([callsign], row_to_qso)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// All contacts with a park, newest first.
    pub fn qsos_for_park(&self, park: &str) -> AppResult<Vec<Qso>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT * FROM qsos WHERE park_reference = ?1 ORDER BY timestamp DESC",
        )?;
        let rows = stmt.query_map([park], row_to_qso)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Rows still waiting for the remote, oldest first. The ordering defines
    /// the FIFO push order of the reconciler.
    pub fn unsynced_qsos(&self) -> AppResult<Vec<Qso>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT * FROM qsos WHERE synced = 0 ORDER BY created_at ASC")?;
        let rows = stmt.query_map([], row_to_qso)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn mark_synced(&self, id: &str) -> AppResult<()> {
        self.conn
            .execute("UPDATE qsos SET synced = 1 WHERE id = ?1", [id])?;
        Ok(())
    }

    /// The complete log, oldest first (export feed).
    pub fn all_qsos(&self) -> AppResult<Vec<Qso>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT * FROM qsos ORDER BY timestamp ASC")?;
        let rows = stmt.query_map([], row_to_qso)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    /// Every park reference ever logged.
    pub fn worked_parks(&self) -> AppResult<BTreeSet<String>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT DISTINCT park_reference FROM qsos WHERE park_reference IS NOT NULL",
        )?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut parks = BTreeSet::new();
        for r in rows {
            parks.insert(r?);
        }
        Ok(parks)
    }

    /// Merge a pulled remote snapshot into the local log, atomically.
    /// Rows are matched by id: existing ids are skipped, new ones inserted.
    /// Pulled QSOs land already synced (they originated remotely). Any
    /// failure rolls the whole batch back.
    pub fn upsert_from_remote(
        &mut self,
        sessions: &[HuntSession],
        qsos: &[Qso],
    ) -> AppResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut ins_session = tx.prepare_cached(
                "INSERT OR IGNORE INTO hunt_sessions (id, session_date, created_at)
                 VALUES (?1, ?2, ?3)",
            )?;
            for s in sessions {
                ins_session.execute(params![s.id, s.date_str(), s.created_at])?;
            }

            let mut ins_qso = tx.prepare_cached(
                "INSERT OR IGNORE INTO qsos
                    (id, hunt_session_id, park_reference, callsign, frequency, band, mode,
                     rst_sent, rst_received, timestamp, created_at, synced)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, 1)",
            )?;
            for q in qsos {
                ins_qso.execute(params![
                    q.id,
                    q.hunt_session_id,
                    q.park_reference,
                    q.callsign,
                    q.frequency,
                    q.band,
                    q.mode,
                    q.rst_sent,
                    q.rst_received,
                    q.timestamp,
                    q.created_at,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}
