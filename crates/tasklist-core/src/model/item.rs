use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, never-reused identity of an item.
///
/// Fresh ids are random v4 UUIDs. Ids read back from storage are kept
/// verbatim, so records written by other tools round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Assign a fresh identity.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an id that already exists (for example one read from the index).
    #[must_use]
    pub fn from_existing(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attributes supplied when creating an item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub title: String,
    pub completed: bool,
}

impl NewItem {
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
        }
    }
}

/// A single task record. This is also the persisted shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub order: u64,
}

impl Item {
    /// Build a new item with a freshly assigned id.
    ///
    /// An empty title is kept as the empty-string default rather than
    /// rejected.
    #[must_use]
    pub fn create(attrs: NewItem, order: u64) -> Self {
        Self {
            id: ItemId::generate(),
            title: attrs.title,
            completed: attrs.completed,
            order,
        }
    }

    /// Flip the completion flag.
    pub const fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Set the completion flag, returning whether it changed.
    pub const fn set_completed(&mut self, completed: bool) -> bool {
        if self.completed == completed {
            return false;
        }
        self.completed = completed;
        true
    }

    /// Replace the title with the trimmed `raw` value.
    ///
    /// Returns `false` and leaves the item untouched when `raw` is blank;
    /// the caller decides what a blank rename means.
    pub fn rename(&mut self, raw: &str) -> bool {
        match normalize_title(raw) {
            Some(title) => {
                self.title = title;
                true
            }
            None => false,
        }
    }
}

/// Trim a user-entered title; `None` when nothing is left.
#[must_use]
pub fn normalize_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
