use crate::errors::AppResult;
use rusqlite::Connection;

/// Fixed two-table schema. There is no migration engine: the schema never
/// changes shape, so both tables are created idempotently on every open.
pub const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS hunt_sessions (
    id           TEXT PRIMARY KEY,
    session_date TEXT NOT NULL UNIQUE,  -- YYYY-MM-DD
    created_at   TEXT NOT NULL          -- ISO 8601
);

CREATE TABLE IF NOT EXISTS qsos (
    id              TEXT PRIMARY KEY,
    hunt_session_id TEXT NOT NULL REFERENCES hunt_sessions(id),
    park_reference  TEXT,
    callsign        TEXT NOT NULL,
    frequency       REAL NOT NULL,
    band            TEXT NOT NULL DEFAULT '',
    mode            TEXT NOT NULL DEFAULT '',
    rst_sent        TEXT NOT NULL DEFAULT '',
    rst_received    TEXT NOT NULL DEFAULT '',
    timestamp       TEXT NOT NULL,      -- ISO 8601 UTC
    created_at      TEXT NOT NULL,      -- ISO 8601
    synced          INTEGER NOT NULL DEFAULT 0,
    UNIQUE (hunt_session_id, callsign, park_reference, band)
);
";

/// Initialize the database schema.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
