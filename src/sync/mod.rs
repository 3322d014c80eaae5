pub mod reconciler;
pub mod remote;

pub use remote::RemoteStore;
