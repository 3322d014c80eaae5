use crate::utils::band::freq_mhz_to_band;
use crate::utils::date::now_rfc3339;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A logged two-way contact (QSO), optionally tied to a park activation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Qso {
    pub id: String,
    pub hunt_session_id: String,
    pub park_reference: Option<String>,
    pub callsign: String,
    pub frequency: f64, // MHz
    pub band: String,
    pub mode: String,
    pub rst_sent: String,
    pub rst_received: String,
    pub timestamp: String,  // ⇔ qsos.timestamp (TEXT, ISO8601 UTC)
    pub created_at: String, // ⇔ qsos.created_at (TEXT, ISO8601)
    pub synced: bool,       // ⇔ qsos.synced (INTEGER 0|1)
}

/// Operator-entered fields for a new QSO, before normalization.
#[derive(Debug, Clone, Default)]
pub struct QsoDraft {
    pub park_reference: Option<String>,
    pub callsign: String,
    pub frequency: f64, // MHz
    pub mode: String,
    pub rst_sent: String,
    pub rst_received: String,
    /// Contact instant; None means "now".
    pub timestamp: Option<String>,
}

impl Qso {
    /// Build a QSO from a draft. This is the normalization chokepoint for the
    /// duplicate-identity key: callsign and park reference are trimmed and
    /// uppercased, and the band label is derived from the frequency. The
    /// store compares keys byte-for-byte, nothing downstream re-normalizes.
    pub fn new(hunt_session_id: &str, draft: QsoDraft) -> Self {
        let now = now_rfc3339();
        let park_reference = draft.park_reference.and_then(|p| {
            let p = p.trim().to_uppercase();
            if p.is_empty() { None } else { Some(p) }
        });
        Self {
            id: Uuid::new_v4().to_string(),
            hunt_session_id: hunt_session_id.to_string(),
            park_reference,
            callsign: draft.callsign.trim().to_uppercase(),
            frequency: draft.frequency,
            band: freq_mhz_to_band(draft.frequency).to_string(),
            mode: draft.mode,
            rst_sent: draft.rst_sent,
            rst_received: draft.rst_received,
            timestamp: draft.timestamp.unwrap_or_else(|| now.clone()),
            created_at: now,
            synced: false,
        }
    }
}

/// Outcome of an insert attempt. A duplicate is an expected result the
/// caller branches on, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted { id: String },
    Duplicate,
}

impl InsertOutcome {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, InsertOutcome::Duplicate)
    }
}
