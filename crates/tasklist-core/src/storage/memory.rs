use super::KeyValueStore;
use crate::error::StoreError;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// In-memory store.
///
/// Clones share the same map, which lets a test "reload the page" by
/// building a second collection over a clone of the first one's store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys, index entry included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Copy of every key currently stored, in key order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());
        store.set("k", "v").expect("set");
        assert_eq!(store.get("k").expect("get"), Some("v".to_string()));
        store.remove("k").expect("remove");
        assert_eq!(store.get("k").expect("get"), None);
        store.remove("k").expect("removing twice is fine");
    }

    #[test]
    fn clones_share_entries() {
        let mut store = MemoryStore::new();
        let reloaded = store.clone();
        store.set("a", "1").expect("set");
        assert_eq!(reloaded.get("a").expect("get"), Some("1".to_string()));
        assert_eq!(reloaded.keys(), vec!["a".to_string()]);
    }
}
