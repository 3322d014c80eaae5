//! Band plan: map a raw frequency to its amateur band label.

/// Inclusive kHz range per band. Both edges belong to the band.
const BAND_EDGES: [(f64, f64, &str); 13] = [
    (1800.0, 2000.0, "160m"),
    (3500.0, 4000.0, "80m"),
    (5330.0, 5410.0, "60m"),
    (7000.0, 7300.0, "40m"),
    (10100.0, 10150.0, "30m"),
    (14000.0, 14350.0, "20m"),
    (18068.0, 18168.0, "17m"),
    (21000.0, 21450.0, "15m"),
    (24890.0, 24990.0, "12m"),
    (28000.0, 29700.0, "10m"),
    (50000.0, 54000.0, "6m"),
    (144000.0, 148000.0, "2m"),
    (430000.0, 440000.0, "70cm"),
];

/// Band label for a kHz frequency, or "" when it falls outside every range.
/// The empty label is still a valid duplicate-key component.
pub fn freq_khz_to_band(freq_khz: f64) -> &'static str {
    BAND_EDGES
        .iter()
        .find(|(min, max, _)| freq_khz >= *min && freq_khz <= *max)
        .map(|(_, _, band)| *band)
        .unwrap_or("")
}

/// QSO entry stores frequency in MHz (ADIF convention); spots arrive in kHz.
pub fn freq_mhz_to_band(freq_mhz: f64) -> &'static str {
    freq_khz_to_band(freq_mhz * 1000.0)
}
