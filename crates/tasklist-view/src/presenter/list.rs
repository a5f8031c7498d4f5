//! The page: one row per live item, the footer, and the filter.
//!
//! The list presenter owns the collection and listens to its events. Rows are
//! created, redrawn and dropped only from that listener, so every path that
//! changes an item (a click here, a bulk clear, a reload) updates the screen
//! the same way. Filter changes never rebuild the list: each row re-checks its
//! own visibility.

use super::item::{EditOutcome, ItemPresenter};
use crate::filter::{Filter, FilterState};
use crate::router::Router;
use crate::surface::{FooterView, Surface};
use crate::ui_event::{Key, UiEvent};
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use tasklist_core::model::normalize_title;
use tasklist_core::{
    CollectionEvent, Item, ItemCollection, ItemId, KeyValueStore, ListenerId, NewItem, Stats,
    StoreError,
};

/// Screen-side state shared with the collection listener.
#[derive(Debug)]
struct Page<U> {
    surface: U,
    filter: FilterState,
    rows: Vec<ItemPresenter>,
}

impl<U: Surface> Page<U> {
    fn on_event(&mut self, event: &CollectionEvent, items: &[Item]) {
        match event {
            CollectionEvent::Added(item) => self.add_one(item),
            CollectionEvent::Removed(item) => self.remove_one(&item.id),
            CollectionEvent::Changed { item, .. } => self.refresh_one(item),
            CollectionEvent::Reset => self.add_all(items),
        }
        self.render_footer(items);
    }

    fn add_one(&mut self, item: &Item) {
        let presenter = ItemPresenter::new(item, self.filter.current());
        self.surface.append_row(presenter.row());
        self.rows.push(presenter);
    }

    fn add_all(&mut self, items: &[Item]) {
        self.rows.clear();
        self.surface.clear_rows();
        for item in items {
            self.add_one(item);
        }
    }

    fn remove_one(&mut self, id: &ItemId) {
        self.rows.retain(|row| row.id() != id);
        self.surface.remove_row(id);
    }

    fn refresh_one(&mut self, item: &Item) {
        let filter = self.filter.current();
        if let Some(presenter) = self.rows.iter_mut().find(|row| row.id() == &item.id) {
            let row = presenter.refresh(item, filter);
            self.surface.update_row(row);
        }
    }

    fn filter_all(&mut self) {
        let filter = self.filter.current();
        for presenter in &mut self.rows {
            if presenter.recheck_visibility(filter) {
                self.surface.update_row(presenter.row());
            }
        }
    }

    fn render_footer(&mut self, items: &[Item]) {
        let footer = FooterView::new(Stats::of(items), self.filter.current());
        self.surface.render_footer(&footer);
    }

    fn presenter_mut(&mut self, id: &ItemId) -> Option<&mut ItemPresenter> {
        self.rows.iter_mut().find(|row| row.id() == id)
    }

    /// Run `f` on one row and redraw it if `f` says so.
    fn with_row<F>(&mut self, id: &ItemId, f: F) -> bool
    where
        F: FnOnce(&mut ItemPresenter) -> bool,
    {
        let Some(presenter) = self.rows.iter_mut().find(|row| row.id() == id) else {
            tracing::debug!(id = %id, "no row for item");
            return false;
        };
        let redraw = f(presenter);
        if redraw {
            self.surface.update_row(presenter.row());
        }
        redraw
    }
}

/// Top-level presenter for the task list page.
pub struct ListPresenter<S, U> {
    collection: ItemCollection<S>,
    page: Rc<RefCell<Page<U>>>,
    listener: ListenerId,
}

impl<S, U> std::fmt::Debug for ListPresenter<S, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListPresenter")
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}

impl<S, U> ListPresenter<S, U>
where
    S: KeyValueStore,
    U: Surface + 'static,
{
    /// Attach to `collection` and draw onto `surface`.
    pub fn new(mut collection: ItemCollection<S>, surface: U) -> Self {
        let page = Rc::new(RefCell::new(Page {
            surface,
            filter: FilterState::default(),
            rows: Vec::new(),
        }));

        let shared = Rc::clone(&page);
        let listener = collection
            .events_mut()
            .subscribe(move |event, items| shared.borrow_mut().on_event(event, items));

        Self {
            collection,
            page,
            listener,
        }
    }

    /// Load stored items (one full rebuild) and apply the initial location.
    ///
    /// # Errors
    ///
    /// A damaged or unreadable store is fatal here; the page stays empty.
    pub fn start(&mut self, fragment: &str) -> Result<(), StoreError> {
        self.navigate(fragment);
        self.collection.load()
    }

    #[must_use]
    pub const fn collection(&self) -> &ItemCollection<S> {
        &self.collection
    }

    /// Detach from the collection and hand it back. The rows stop listening.
    #[must_use]
    pub fn into_collection(mut self) -> ItemCollection<S> {
        self.collection.events_mut().unsubscribe(self.listener);
        self.collection
    }

    #[must_use]
    pub fn filter(&self) -> Filter {
        self.page.borrow().filter.current()
    }

    /// Borrow the surface, for inspection.
    #[must_use]
    pub fn surface(&self) -> Ref<'_, U> {
        Ref::map(self.page.borrow(), |page| &page.surface)
    }

    /// Number of live row presenters.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.page.borrow().rows.len()
    }

    /// Route one input event to its handler.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures from the triggered mutation.
    pub fn dispatch(&mut self, event: UiEvent) -> Result<(), StoreError> {
        if let Some(binding) = event.binding() {
            tracing::trace!(event = binding.event, selector = binding.selector, "dispatch");
        }
        match event {
            UiEvent::NewTodoKeypress { key, value } => {
                self.create_on_enter(key, &value)?;
            }
            UiEvent::ClearCompleted => {
                self.clear_completed()?;
            }
            UiEvent::ToggleAll => {
                self.toggle_all()?;
            }
            UiEvent::Check(id) => {
                self.toggle(&id)?;
            }
            UiEvent::BeginEdit(id) => self.begin_edit(&id),
            UiEvent::Destroy(id) => {
                self.destroy(&id)?;
            }
            UiEvent::EditInput { id, value } => self.edit_input(&id, &value),
            UiEvent::EditKeypress { id, key } | UiEvent::EditKeydown { id, key } => {
                self.edit_key(&id, key)?;
            }
            UiEvent::EditBlur(id) => {
                self.commit_edit(&id)?;
            }
            UiEvent::Navigate(fragment) => self.navigate(&fragment),
        }
        Ok(())
    }

    /// Create an item from the new-item field when Enter is pressed on
    /// non-blank input.
    ///
    /// # Errors
    ///
    /// Returns an error if the new item cannot be persisted.
    pub fn create_on_enter(&mut self, key: Key, input: &str) -> Result<Option<ItemId>, StoreError> {
        if key != Key::Enter {
            return Ok(None);
        }
        let Some(title) = normalize_title(input) else {
            return Ok(None);
        };
        let id = self.collection.add(NewItem {
            title,
            completed: false,
        })?;
        self.page.borrow_mut().surface.clear_new_input();
        Ok(Some(id))
    }

    /// Flip one item's completion.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be persisted.
    pub fn toggle(&mut self, id: &ItemId) -> Result<bool, StoreError> {
        self.collection.toggle(id)
    }

    /// Destroy one item.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be deleted.
    pub fn destroy(&mut self, id: &ItemId) -> Result<bool, StoreError> {
        self.collection.remove(id)
    }

    /// Destroy every completed item.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be deleted.
    pub fn clear_completed(&mut self) -> Result<usize, StoreError> {
        self.collection.clear_completed()
    }

    /// Mark everything completed, or everything active when nothing remains.
    ///
    /// # Errors
    ///
    /// Returns an error if a change cannot be persisted.
    pub fn toggle_all(&mut self) -> Result<usize, StoreError> {
        let completed = self.collection.stats().remaining > 0;
        self.collection.toggle_all(completed)
    }

    pub fn begin_edit(&mut self, id: &ItemId) {
        self.page.borrow_mut().with_row(id, |row| {
            row.begin_edit();
            true
        });
    }

    pub fn edit_input(&mut self, id: &ItemId, value: &str) {
        self.page.borrow_mut().with_row(id, |row| {
            row.set_edit_value(value);
            true
        });
    }

    /// Enter commits the edit, Escape cancels it.
    ///
    /// # Errors
    ///
    /// Returns an error if a commit cannot be persisted.
    pub fn edit_key(&mut self, id: &ItemId, key: Key) -> Result<(), StoreError> {
        match key {
            Key::Enter => self.commit_edit(id),
            Key::Escape => {
                self.cancel_edit(id);
                Ok(())
            }
            Key::Other(_) => Ok(()),
        }
    }

    /// Close the editor: save a non-blank title, destroy the item otherwise.
    ///
    /// Does nothing when the row is not being edited, so the blur that
    /// follows an Enter commit is harmless.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename or removal cannot be persisted.
    pub fn commit_edit(&mut self, id: &ItemId) -> Result<(), StoreError> {
        let outcome = {
            let mut page = self.page.borrow_mut();
            let Some(presenter) = page.presenter_mut(id) else {
                return Ok(());
            };
            let outcome = presenter.commit_edit();
            if outcome != EditOutcome::NotEditing {
                let row = presenter.row().clone();
                page.surface.update_row(&row);
            }
            outcome
        };

        match outcome {
            EditOutcome::NotEditing => {}
            EditOutcome::Rename(title) => {
                self.collection.rename(id, &title)?;
            }
            EditOutcome::Remove => {
                tracing::debug!(id = %id, "blank edit removes item");
                self.collection.remove(id)?;
            }
        }
        Ok(())
    }

    /// Leave edit mode without touching the item.
    pub fn cancel_edit(&mut self, id: &ItemId) {
        self.page.borrow_mut().with_row(id, ItemPresenter::cancel_edit);
    }

    /// Apply a location change: update the filter, re-check every row's
    /// visibility, and re-mark the selected footer link.
    pub fn navigate(&mut self, fragment: &str) {
        let filter = Router::route(fragment);
        let mut page = self.page.borrow_mut();
        page.filter.set(filter);
        page.filter_all();
        page.render_footer(self.collection.items());
    }
}
