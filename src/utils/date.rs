use chrono::{NaiveDate, SecondsFormat, Utc};

/// Current UTC calendar date. Sessions are partitioned on UTC days so the
/// log lines up with the UTC timestamps ADIF requires.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Current instant as an ISO 8601 / RFC 3339 UTC string with millisecond
/// precision, the format every timestamp column stores.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
