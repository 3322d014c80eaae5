pub mod heatmap;
pub mod logbook;
pub mod session;
pub mod spots;
