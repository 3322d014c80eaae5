pub mod band;
pub mod date;
pub mod rst;
pub mod time;

pub use band::{freq_khz_to_band, freq_mhz_to_band};
pub use rst::default_rst;
