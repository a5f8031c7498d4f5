use super::KeyValueStore;
use crate::error::StoreError;
use crate::model::{Item, ItemId};

/// Maps items onto a flat key-value store under one namespace.
///
/// Layout:
///
/// | key | value |
/// |---|---|
/// | `<namespace>` | live ids joined by `,` |
/// | `<namespace>-<id>` | JSON record `{id,title,completed,order}` |
///
/// The adapter is the only writer of the index entry. It keeps an in-memory
/// copy of the index, read once at construction.
#[derive(Debug)]
pub struct StorageAdapter<S> {
    store: S,
    namespace: String,
    index: Vec<ItemId>,
}

impl<S: KeyValueStore> StorageAdapter<S> {
    /// Bind an adapter to `store` under `namespace`, reading the index.
    ///
    /// # Errors
    ///
    /// Returns an error if the index entry cannot be read.
    pub fn new(store: S, namespace: impl Into<String>) -> Result<Self, StoreError> {
        let namespace = namespace.into();
        let index = store
            .get(&namespace)?
            .map(|raw| parse_index(&raw))
            .unwrap_or_default();
        Ok(Self {
            store,
            namespace,
            index,
        })
    }

    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Ids currently listed in the index, in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[ItemId] {
        &self.index
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Storage key of one item record.
    #[must_use]
    pub fn record_key(&self, id: &ItemId) -> String {
        format!("{}-{}", self.namespace, id)
    }

    /// Write `item` and make sure its id is indexed.
    ///
    /// A new id is indexed only after its record is stored. If the index
    /// write then fails the record is taken back out, so storage never holds
    /// an unindexed record or an index entry without one.
    ///
    /// # Errors
    ///
    /// Returns an error if the record or the index cannot be written. The
    /// cached index is unchanged in that case.
    pub fn save(&mut self, item: &Item) -> Result<(), StoreError> {
        let key = self.record_key(&item.id);
        let body = serde_json::to_string(item).map_err(|source| StoreError::Encode {
            key: key.clone(),
            source,
        })?;
        self.store.set(&key, &body)?;

        if !self.index.contains(&item.id) {
            let mut index = self.index.clone();
            index.push(item.id.clone());
            if let Err(err) = self.write_index(&index) {
                if let Err(undo) = self.store.remove(&key) {
                    tracing::warn!(key = %key, error = %undo, "could not drop unindexed record");
                }
                return Err(err);
            }
            self.index = index;
        }
        tracing::debug!(key = %key, "saved record");
        Ok(())
    }

    /// Drop `id` from the index, then remove its record.
    ///
    /// If the record cannot be removed the previous index is written back,
    /// leaving the item stored and indexed as before.
    ///
    /// # Errors
    ///
    /// Returns an error if the index or the record cannot be written. The
    /// cached index is unchanged in that case.
    pub fn delete(&mut self, id: &ItemId) -> Result<(), StoreError> {
        let key = self.record_key(id);
        let index: Vec<ItemId> = self
            .index
            .iter()
            .filter(|known| *known != id)
            .cloned()
            .collect();
        let indexed = index.len() != self.index.len();
        if indexed {
            self.write_index(&index)?;
        }

        if let Err(err) = self.store.remove(&key) {
            if indexed {
                let previous = self.index.clone();
                if let Err(undo) = self.write_index(&previous) {
                    tracing::warn!(key = %key, error = %undo, "could not restore index");
                }
            }
            return Err(err);
        }
        self.index = index;
        tracing::debug!(key = %key, "deleted record");
        Ok(())
    }

    /// Read one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored record does not parse.
    pub fn find(&self, id: &ItemId) -> Result<Option<Item>, StoreError> {
        let key = self.record_key(id);
        self.store
            .get(&key)?
            .map(|raw| decode_record(&key, &raw))
            .transpose()
    }

    /// Read every indexed record, in index order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingRecord`] if the index names an id with no
    /// stored record and [`StoreError::CorruptRecord`] if a record does not
    /// parse. Neither is skipped: a damaged store is a fatal load error.
    pub fn load_all(&self) -> Result<Vec<Item>, StoreError> {
        let mut items = Vec::with_capacity(self.index.len());
        for id in &self.index {
            let key = self.record_key(id);
            let raw = self
                .store
                .get(&key)?
                .ok_or_else(|| StoreError::MissingRecord { key: key.clone() })?;
            items.push(decode_record(&key, &raw)?);
        }
        Ok(items)
    }

    fn write_index(&mut self, index: &[ItemId]) -> Result<(), StoreError> {
        let joined = index
            .iter()
            .map(ItemId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        self.store.set(&self.namespace, &joined)
    }
}

fn parse_index(raw: &str) -> Vec<ItemId> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ItemId::from_existing)
        .collect()
}

fn decode_record(key: &str, raw: &str) -> Result<Item, StoreError> {
    serde_json::from_str(raw).map_err(|source| StoreError::CorruptRecord {
        key: key.to_string(),
        source,
    })
}
