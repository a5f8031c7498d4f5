//! The ordered, persisted set of live items.
//!
//! Every mutation follows the same sequence: compute the new record, write it
//! through the [`StorageAdapter`], apply it in memory, then notify listeners.
//! A listener therefore never observes a state that is not yet durable, and a
//! failed write leaves both memory and storage at the previous state.

use crate::error::StoreError;
use crate::event::{ChangedFields, CollectionEvent, EventBus};
use crate::model::{Item, ItemId, NewItem};
use crate::storage::{KeyValueStore, StorageAdapter};

/// Aggregate counts shown in the page footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub remaining: usize,
}

impl Stats {
    /// Count `items` in one pass.
    #[must_use]
    pub fn of(items: &[Item]) -> Self {
        let completed = items.iter().filter(|item| item.completed).count();
        Self {
            total: items.len(),
            completed,
            remaining: items.len() - completed,
        }
    }
}

#[derive(Debug)]
pub struct ItemCollection<S> {
    items: Vec<Item>,
    adapter: StorageAdapter<S>,
    events: EventBus,
}

impl<S: KeyValueStore> ItemCollection<S> {
    /// An empty collection bound to `adapter`. Call [`Self::load`] to pull in
    /// stored items.
    #[must_use]
    pub fn new(adapter: StorageAdapter<S>) -> Self {
        Self {
            items: Vec::new(),
            adapter,
            events: EventBus::new(),
        }
    }

    /// Replace the contents with every stored record and emit one
    /// [`CollectionEvent::Reset`].
    ///
    /// # Errors
    ///
    /// Fails when the store is unreadable or any indexed record is missing or
    /// corrupt. The in-memory contents are left untouched in that case.
    pub fn load(&mut self) -> Result<(), StoreError> {
        let mut items = self.adapter.load_all()?;
        items.sort_by_key(|item| item.order);
        self.items = items;

        tracing::info!(
            namespace = self.adapter.namespace(),
            count = self.items.len(),
            "loaded items"
        );
        self.notify(&CollectionEvent::Reset);
        Ok(())
    }

    /// Order to assign to the next created item.
    ///
    /// `1` for an empty collection, otherwise one past the last live item's
    /// order. Items are kept sorted, so this is constant time and depends only
    /// on what is live, never on what this instance has seen before.
    #[must_use]
    pub fn next_order(&self) -> u64 {
        self.items.last().map_or(1, |item| item.order + 1)
    }

    /// Create, persist and append a new item.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be persisted; nothing is added.
    pub fn add(&mut self, attrs: NewItem) -> Result<ItemId, StoreError> {
        let item = Item::create(attrs, self.next_order());
        self.adapter.save(&item)?;

        let at = self.items.partition_point(|known| known.order <= item.order);
        self.items.insert(at, item.clone());

        tracing::debug!(id = %item.id, order = item.order, "added item");
        let id = item.id.clone();
        self.notify(&CollectionEvent::Added(item));
        Ok(id)
    }

    /// Destroy an item: drop it from storage and from the collection.
    ///
    /// Returns `false` if `id` is not live.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be deleted; the item stays.
    pub fn remove(&mut self, id: &ItemId) -> Result<bool, StoreError> {
        let Some(at) = self.position(id) else {
            tracing::warn!(id = %id, "remove ignored: item is not live");
            return Ok(false);
        };
        self.adapter.delete(id)?;
        let item = self.items.remove(at);

        tracing::debug!(id = %item.id, "removed item");
        self.notify(&CollectionEvent::Removed(item));
        Ok(true)
    }

    /// Flip an item's completion flag.
    ///
    /// Returns `false` if `id` is not live.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated record cannot be persisted.
    pub fn toggle(&mut self, id: &ItemId) -> Result<bool, StoreError> {
        self.update(id, ChangedFields::COMPLETED, |item| {
            item.toggle();
            true
        })
    }

    /// Set an item's completion flag. Returns whether the flag changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated record cannot be persisted.
    pub fn set_completed(&mut self, id: &ItemId, completed: bool) -> Result<bool, StoreError> {
        self.update(id, ChangedFields::COMPLETED, |item| {
            item.set_completed(completed)
        })
    }

    /// Retitle an item with the trimmed `raw` text.
    ///
    /// Blank input is refused (returns `false`, nothing written); deciding
    /// what blank means is the caller's business. An identical title is
    /// accepted without a write or a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated record cannot be persisted.
    pub fn rename(&mut self, id: &ItemId, raw: &str) -> Result<bool, StoreError> {
        let Some(current) = self.get(id) else {
            tracing::warn!(id = %id, "rename ignored: item is not live");
            return Ok(false);
        };
        let before = current.title.clone();
        let mut accepted = false;
        self.update(id, ChangedFields::TITLE, |item| {
            accepted = item.rename(raw);
            accepted && item.title != before
        })?;
        Ok(accepted)
    }

    /// Destroy every completed item. Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Stops at the first failed delete; earlier removals stand.
    pub fn clear_completed(&mut self) -> Result<usize, StoreError> {
        let doomed: Vec<ItemId> = self
            .completed_items()
            .into_iter()
            .map(|item| item.id.clone())
            .collect();
        for id in &doomed {
            self.remove(id)?;
        }
        Ok(doomed.len())
    }

    /// Mark every item completed (or not). Returns how many changed.
    ///
    /// # Errors
    ///
    /// Stops at the first failed write; earlier changes stand.
    pub fn toggle_all(&mut self, completed: bool) -> Result<usize, StoreError> {
        let targets: Vec<ItemId> = self
            .items
            .iter()
            .filter(|item| item.completed != completed)
            .map(|item| item.id.clone())
            .collect();
        for id in &targets {
            self.set_completed(id, completed)?;
        }
        Ok(targets.len())
    }

    /// Completed items in display order.
    #[must_use]
    pub fn completed_items(&self) -> Vec<&Item> {
        self.items.iter().filter(|item| item.completed).collect()
    }

    /// Items still to do, in display order.
    #[must_use]
    pub fn remaining_items(&self) -> Vec<&Item> {
        self.items.iter().filter(|item| !item.completed).collect()
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        Stats::of(&self.items)
    }

    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Live items sorted by ascending order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn adapter(&self) -> &StorageAdapter<S> {
        &self.adapter
    }

    /// Registry for change listeners.
    pub const fn events_mut(&mut self) -> &mut EventBus {
        &mut self.events
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.items.iter().position(|item| &item.id == id)
    }

    /// Apply `mutate` to a copy of the item; persist and notify only when it
    /// reports a change.
    fn update<F>(&mut self, id: &ItemId, fields: ChangedFields, mutate: F) -> Result<bool, StoreError>
    where
        F: FnOnce(&mut Item) -> bool,
    {
        let Some(at) = self.position(id) else {
            tracing::warn!(id = %id, "update ignored: item is not live");
            return Ok(false);
        };

        let mut next = self.items[at].clone();
        if !mutate(&mut next) {
            return Ok(false);
        }
        self.adapter.save(&next)?;
        self.items[at] = next.clone();

        tracing::debug!(id = %next.id, completed = next.completed, "changed item");
        self.notify(&CollectionEvent::Changed { item: next, fields });
        Ok(true)
    }

    fn notify(&mut self, event: &CollectionEvent) {
        self.events.emit(event, &self.items);
    }
}
