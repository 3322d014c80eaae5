//! potalog library root.
//!
//! Local-first logging core for POTA hunters: an embedded SQLite log with a
//! single-writer async access boundary, duplicate suppression, an
//! offline-tolerant remote sync reconciler, calendar heatmap read-models and
//! ADIF export. The crate has no process surface of its own; a UI embeds it
//! and drives it through [`db::StoreHandle`] and the `core` operations.

pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod sync;
pub mod utils;

pub use config::Settings;
pub use db::{DateCount, StoreHandle};
pub use errors::{AppError, AppResult};
pub use models::{AnnotatedSpot, HuntSession, InsertOutcome, Qso, QsoDraft, Spot};
pub use sync::RemoteStore;
