//! Change notifications fired by the item collection.
//!
//! Listeners are plain callbacks keyed by a [`ListenerId`]. They run
//! synchronously, in registration order, after the change they describe has
//! already been persisted.

use crate::model::Item;

/// Which item fields a [`CollectionEvent::Changed`] touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChangedFields {
    pub title: bool,
    pub completed: bool,
}

impl ChangedFields {
    pub const TITLE: Self = Self {
        title: true,
        completed: false,
    };
    pub const COMPLETED: Self = Self {
        title: false,
        completed: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionEvent {
    /// A new item was created and persisted.
    Added(Item),
    /// An item was destroyed; it is no longer in the collection or in storage.
    Removed(Item),
    /// An item was mutated in place.
    Changed { item: Item, fields: ChangedFields },
    /// The collection was replaced wholesale by a load.
    Reset,
}

impl CollectionEvent {
    /// Short event name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Added(_) => "add",
            Self::Removed(_) => "remove",
            Self::Changed { .. } => "change",
            Self::Reset => "reset",
        }
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&CollectionEvent, &[Item])>;

/// Tagged callback registry.
#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener)>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener`; it sees every subsequent event along with the
    /// collection's current items in display order.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&CollectionEvent, &[Item]) + 'static,
    {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(known, _)| *known != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver `event` to every listener in registration order.
    pub fn emit(&mut self, event: &CollectionEvent, items: &[Item]) {
        tracing::trace!(event = event.name(), listeners = self.listeners.len(), "emit");
        for (_, listener) in &mut self.listeners {
            listener(event, items);
        }
    }
}
