pub mod qso;
pub mod session;
pub mod spot;

pub use qso::{InsertOutcome, Qso, QsoDraft};
pub use session::HuntSession;
pub use spot::{AnnotatedSpot, Spot};
