pub mod item;
pub mod list;

pub use item::{EditOutcome, ItemPresenter};
pub use list::ListPresenter;
