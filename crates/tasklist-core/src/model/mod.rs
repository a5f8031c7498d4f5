pub mod item;

pub use item::{Item, ItemId, NewItem, normalize_title};
