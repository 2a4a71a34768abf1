pub mod store;

pub use store::{FileStore, MemoryStore, KeyValueStore, StorageError};
