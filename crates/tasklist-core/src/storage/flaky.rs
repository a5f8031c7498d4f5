//! A memory store that fails chosen writes once each.

use super::{KeyValueStore, MemoryStore};
use crate::error::StoreError;
use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Set,
    Remove,
}

/// Clones share both the entries and the pending failures, so a test can arm
/// a failure after handing the store to an adapter.
#[derive(Debug, Clone, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    faults: Rc<RefCell<Vec<(Op, String)>>>,
}

impl FlakyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The entries underneath, for inspection.
    #[must_use]
    pub fn memory(&self) -> MemoryStore {
        self.inner.clone()
    }

    /// Make the next `set` of `key` fail.
    pub fn fail_next_set(&self, key: impl Into<String>) {
        self.faults.borrow_mut().push((Op::Set, key.into()));
    }

    /// Make the next `remove` of `key` fail.
    pub fn fail_next_remove(&self, key: impl Into<String>) {
        self.faults.borrow_mut().push((Op::Remove, key.into()));
    }

    fn trip(&self, op: Op, key: &str) -> Result<(), StoreError> {
        let mut faults = self.faults.borrow_mut();
        let Some(at) = faults.iter().position(|(armed, k)| *armed == op && k == key) else {
            return Ok(());
        };
        faults.remove(at);
        Err(StoreError::Write {
            path: PathBuf::from(key),
            source: io::Error::other("injected write failure"),
        })
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.trip(Op::Set, key)?;
        self.inner.set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.trip(Op::Remove, key)?;
        self.inner.remove(key)
    }
}
