//! ADIF 3.1.4 text export: length-tagged fields, one header block, one
//! `<EOR>`-terminated record per QSO.

use chrono::{DateTime, Utc};

use crate::models::Qso;

fn adif_field(tag: &str, value: &str) -> String {
    format!("<{}:{}>{}", tag, value.len(), value)
}

/// Render the full ordered log as an ADIF document.
pub fn generate_adif(qsos: &[Qso]) -> String {
    let header = [
        "ADIF Export from potalog".to_string(),
        adif_field("ADIF_VER", "3.1.4"),
        adif_field("PROGRAMID", "potalog"),
        "<EOH>".to_string(),
        String::new(),
    ]
    .join("\n");

    let records: Vec<String> = qsos.iter().map(adif_record).collect();
    format!("{}{}\n", header, records.join("\n"))
}

fn adif_record(q: &Qso) -> String {
    let (date, time) = split_timestamp(&q.timestamp);
    let mut fields = vec![
        adif_field("CALL", &q.callsign),
        adif_field("QSO_DATE", &date),
        adif_field("TIME_ON", &time),
        adif_field("BAND", &q.band),
        adif_field("MODE", &q.mode),
        adif_field("FREQ", &q.frequency.to_string()),
        adif_field("RST_SENT", &q.rst_sent),
        adif_field("RST_RCVD", &q.rst_received),
    ];
    if let Some(park) = &q.park_reference {
        fields.push(adif_field("SIG", "POTA"));
        fields.push(adif_field("SIG_INFO", park));
    }
    fields.push("<EOR>".to_string());
    fields.join(" ")
}

/// "YYYYMMDD" and "HHMM" in UTC from a stored RFC 3339 timestamp. An
/// unparseable timestamp yields empty fields rather than a failed export.
fn split_timestamp(ts: &str) -> (String, String) {
    match DateTime::parse_from_rfc3339(ts) {
        Ok(dt) => {
            let utc = dt.with_timezone(&Utc);
            (
                utc.format("%Y%m%d").to_string(),
                utc.format("%H%M").to_string(),
            )
        }
        Err(_) => (String::new(), String::new()),
    }
}
