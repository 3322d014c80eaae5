const CW_MODES: [&str; 2] = ["CW", "CW-R"];
const DIGI_MODES: [&str; 8] = [
    "FT8", "FT4", "PSK31", "PSK63", "RTTY", "WSPR", "JT65", "JT9",
];

/// Default signal report for a mode: 599 for CW and digital modes, 59 for
/// phone.
pub fn default_rst(mode: &str) -> &'static str {
    let upper = mode.to_uppercase();
    if CW_MODES.contains(&upper.as_str()) || DIGI_MODES.contains(&upper.as_str()) {
        "599"
    } else {
        "59"
    }
}
