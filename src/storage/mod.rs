pub mod traits;
pub mod json_file;

pub use traits::SnapshotStore;
pub use json_file::JsonFileStore;
