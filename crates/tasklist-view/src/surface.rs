//! The rendering collaborator the presenters draw onto.
//!
//! Presenters compute plain view models ([`RowView`], [`FooterView`]) and hand
//! them to a [`Surface`]. A browser binding would turn them into DOM updates;
//! [`HeadlessSurface`] just keeps them, which is what tests and embedders
//! without a screen use.

use crate::filter::Filter;
use crate::markup;
use tasklist_core::{ItemId, Stats};

/// Everything needed to draw one list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: ItemId,
    pub title: String,
    pub completed: bool,
    pub hidden: bool,
    pub editing: bool,
    /// Contents of the inline edit field.
    pub edit_value: String,
}

/// Aggregate state drawn in the footer and around the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FooterView {
    pub stats: Stats,
    pub selected: Filter,
    /// Main list and footer are shown only when there is at least one item.
    pub visible: bool,
    /// State of the toggle-all checkbox.
    pub all_completed: bool,
}

impl FooterView {
    #[must_use]
    pub const fn new(stats: Stats, selected: Filter) -> Self {
        Self {
            stats,
            selected,
            visible: stats.total > 0,
            all_completed: stats.total > 0 && stats.remaining == 0,
        }
    }
}

pub trait Surface {
    /// Add a row at the end of the list.
    fn append_row(&mut self, row: &RowView);

    /// Redraw an existing row in place.
    fn update_row(&mut self, row: &RowView);

    fn remove_row(&mut self, id: &ItemId);

    /// Drop every row, ahead of a full rebuild.
    fn clear_rows(&mut self);

    fn render_footer(&mut self, footer: &FooterView);

    /// Empty the new-item input after a successful create.
    fn clear_new_input(&mut self);
}

/// A surface that keeps the latest view models in memory.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    rows: Vec<RowView>,
    footer: FooterView,
    new_input_clears: usize,
    row_renders: usize,
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows in on-screen order, hidden ones included.
    #[must_use]
    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, id: &ItemId) -> Option<&RowView> {
        self.rows.iter().find(|row| &row.id == id)
    }

    /// Titles of the rows a user would actually see.
    #[must_use]
    pub fn visible_titles(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| !row.hidden)
            .map(|row| row.title.as_str())
            .collect()
    }

    #[must_use]
    pub const fn footer(&self) -> &FooterView {
        &self.footer
    }

    #[must_use]
    pub const fn new_input_clears(&self) -> usize {
        self.new_input_clears
    }

    /// Count of append/update calls since creation.
    #[must_use]
    pub const fn row_renders(&self) -> usize {
        self.row_renders
    }

    /// Render the list the way a browser template would.
    #[must_use]
    pub fn to_html(&self) -> String {
        let rows: String = self.rows.iter().map(markup::row_html).collect();
        format!(
            "<ul class=\"todo-list\">{rows}</ul>{}",
            markup::footer_html(&self.footer)
        )
    }
}

impl Surface for HeadlessSurface {
    fn append_row(&mut self, row: &RowView) {
        self.row_renders += 1;
        self.rows.push(row.clone());
    }

    fn update_row(&mut self, row: &RowView) {
        self.row_renders += 1;
        if let Some(slot) = self.rows.iter_mut().find(|known| known.id == row.id) {
            *slot = row.clone();
        }
    }

    fn remove_row(&mut self, id: &ItemId) {
        self.rows.retain(|row| &row.id != id);
    }

    fn clear_rows(&mut self) {
        self.rows.clear();
    }

    fn render_footer(&mut self, footer: &FooterView) {
        self.footer = *footer;
    }

    fn clear_new_input(&mut self) {
        self.new_input_clears += 1;
    }
}
