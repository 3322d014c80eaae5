use crate::utils::date::now_rfc3339;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One operating day. QSOs are partitioned by session; at most one session
/// exists per UTC calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HuntSession {
    pub id: String,
    pub session_date: NaiveDate, // ⇔ hunt_sessions.session_date (TEXT "YYYY-MM-DD", UNIQUE)
    pub created_at: String,      // ⇔ hunt_sessions.created_at (TEXT, ISO8601)
}

impl HuntSession {
    /// Session for a date with a fresh client-generated id.
    pub fn new(session_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            session_date,
            created_at: now_rfc3339(),
        }
    }

    pub fn date_str(&self) -> String {
        self.session_date.format("%Y-%m-%d").to_string()
    }
}
