//! Storage Module
//!
//! Local key/value persistence for favorites and the cache snapshot. Each key
//! holds one JSON document, always written whole.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageError;

// == Key Value Storage ==
/// String key/value storage, read and written whole.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the value under `key`, or `None` if nothing was stored.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
