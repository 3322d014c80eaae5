#![allow(dead_code)]
use std::env;
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use potalog::db::StoreHandle;
use potalog::models::{HuntSession, Qso, QsoDraft};

/// Create a unique test DB path inside the system temp dir and remove any
/// existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_potalog.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
}

/// In-memory store handle for tests that don't need a file on disk.
pub fn mem_store() -> StoreHandle {
    StoreHandle::spawn_in_memory().expect("spawn store")
}

/// Session pinned to a date.
pub fn session(date_str: &str) -> HuntSession {
    HuntSession::new(date(date_str))
}

/// Draft with the boilerplate fields filled in.
pub fn draft(callsign: &str, park: Option<&str>, freq_mhz: f64) -> QsoDraft {
    QsoDraft {
        park_reference: park.map(|p| p.to_string()),
        callsign: callsign.to_string(),
        frequency: freq_mhz,
        mode: "SSB".to_string(),
        rst_sent: "59".to_string(),
        rst_received: "59".to_string(),
        timestamp: None,
    }
}

/// Normalized QSO ready for insertion.
pub fn qso(session_id: &str, callsign: &str, park: Option<&str>, freq_mhz: f64) -> Qso {
    Qso::new(session_id, draft(callsign, park, freq_mhz))
}

/// QSO with explicit timestamps, for ordering tests.
pub fn qso_at(
    session_id: &str,
    callsign: &str,
    park: Option<&str>,
    freq_mhz: f64,
    timestamp: &str,
    created_at: &str,
) -> Qso {
    let mut q = qso(session_id, callsign, park, freq_mhz);
    q.timestamp = timestamp.to_string();
    q.created_at = created_at.to_string();
    q
}
