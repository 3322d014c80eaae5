pub mod adif;

pub use adif::generate_adif;
