use crate::filter::Filter;
use crate::surface::RowView;
use tasklist_core::model::normalize_title;
use tasklist_core::{Item, ItemId};

/// What closing the inline editor asks the collection to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The row was not in edit mode; nothing to do.
    NotEditing,
    /// Save the trimmed title.
    Rename(String),
    /// The edit left nothing but whitespace: destroy the item.
    Remove,
}

/// The row for one live item.
///
/// Holds the item's id, never the item: the collection stays the only owner.
/// Every method returns or updates the [`RowView`] the caller should draw.
#[derive(Debug, Clone)]
pub struct ItemPresenter {
    row: RowView,
}

impl ItemPresenter {
    #[must_use]
    pub fn new(item: &Item, filter: Filter) -> Self {
        Self {
            row: RowView {
                id: item.id.clone(),
                title: item.title.clone(),
                completed: item.completed,
                hidden: filter.hides(item.completed),
                editing: false,
                edit_value: item.title.clone(),
            },
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ItemId {
        &self.row.id
    }

    #[must_use]
    pub const fn row(&self) -> &RowView {
        &self.row
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.row.editing
    }

    /// Redraw from the item's current state. An in-progress edit keeps its
    /// buffer.
    pub fn refresh(&mut self, item: &Item, filter: Filter) -> &RowView {
        self.row.title.clone_from(&item.title);
        self.row.completed = item.completed;
        self.row.hidden = filter.hides(item.completed);
        if !self.row.editing {
            self.row.edit_value.clone_from(&item.title);
        }
        &self.row
    }

    /// Re-apply the filter. Returns whether the row's visibility flipped.
    pub const fn recheck_visibility(&mut self, filter: Filter) -> bool {
        let hidden = filter.hides(self.row.completed);
        if hidden == self.row.hidden {
            return false;
        }
        self.row.hidden = hidden;
        true
    }

    /// Enter edit mode with the field pre-filled with the current title.
    pub fn begin_edit(&mut self) {
        self.row.editing = true;
        self.row.edit_value.clone_from(&self.row.title);
    }

    /// Track what the user has typed into the edit field.
    pub fn set_edit_value(&mut self, value: &str) {
        value.clone_into(&mut self.row.edit_value);
    }

    /// Leave edit mode and decide what the typed text means.
    pub fn commit_edit(&mut self) -> EditOutcome {
        if !self.row.editing {
            return EditOutcome::NotEditing;
        }
        self.row.editing = false;
        match normalize_title(&self.row.edit_value) {
            Some(title) => {
                self.row.edit_value.clone_from(&title);
                EditOutcome::Rename(title)
            }
            None => EditOutcome::Remove,
        }
    }

    /// Leave edit mode, discarding the typed text.
    ///
    /// Returns `false` if the row was not being edited.
    pub fn cancel_edit(&mut self) -> bool {
        if !self.row.editing {
            return false;
        }
        self.row.editing = false;
        self.row.edit_value.clone_from(&self.row.title);
        true
    }
}
