//! tasklist-view: the presentation side of the task list.
//!
//! [`ListPresenter`] owns an [`ItemCollection`](tasklist_core::ItemCollection)
//! and keeps a [`Surface`] in step with it. One [`ItemPresenter`] exists per
//! live item; the [`FilterState`] decides which of their rows are hidden.

pub mod filter;
pub mod markup;
pub mod presenter;
pub mod router;
pub mod surface;
pub mod ui_event;

pub use filter::{Filter, FilterState};
pub use presenter::{EditOutcome, ItemPresenter, ListPresenter};
pub use router::Router;
pub use surface::{FooterView, HeadlessSurface, RowView, Surface};
pub use ui_event::{Key, UiEvent};
