pub mod handle;
pub mod initialize;
pub mod stats;
pub mod store;

pub use handle::StoreHandle;
pub use stats::DateCount;
pub use store::Store;
