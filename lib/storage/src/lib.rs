pub mod catalog;
pub mod manager;
pub mod snapshot;

pub use catalog::{load_catalog, save_catalog};
pub use manager::IndexManager;
pub use snapshot::{SnapshotDescription, SnapshotStore, FORMAT_VERSION};
