//! Flat string key-value storage and the item adapter layered on top.
//!
//! The stores know nothing about items. [`StorageAdapter`] owns the key
//! layout: one index entry under the namespace itself listing live ids, and
//! one JSON record per item under `<namespace>-<id>`.

pub mod adapter;
pub mod file;
#[cfg(test)]
mod flaky;
pub mod memory;

pub use adapter::StorageAdapter;
pub use file::FileStore;
#[cfg(test)]
pub(crate) use flaky::FlakyStore;
pub use memory::MemoryStore;

use crate::error::StoreError;

/// A synchronous string key-value store.
pub trait KeyValueStore {
    /// Read the value stored at `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` at `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is not durable.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write is not durable.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// A store chosen at runtime from configuration.
#[derive(Debug)]
pub enum Store {
    Memory(MemoryStore),
    File(FileStore),
}

impl KeyValueStore for Store {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            Self::Memory(store) => store.get(key),
            Self::File(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.set(key, value),
            Self::File(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.remove(key),
            Self::File(store) => store.remove(key),
        }
    }
}
