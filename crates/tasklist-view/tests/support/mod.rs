#![allow(dead_code)]

use tasklist_core::storage::MemoryStore;
use tasklist_core::{ItemCollection, ItemId, StorageAdapter};
use tasklist_view::{HeadlessSurface, Key, ListPresenter};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const NS: &str = "todos-view-test";

pub type Page = ListPresenter<MemoryStore, HeadlessSurface>;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("TASKLIST_LOG")
        .unwrap_or_else(|_| EnvFilter::new("tasklist_view=debug,tasklist_core=debug,warn"));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_test_writer())
        .try_init();
}

/// A started page over `store`.
pub fn open_page(store: &MemoryStore, fragment: &str) -> Page {
    init_tracing();
    let adapter = StorageAdapter::new(store.clone(), NS).expect("adapter");
    let mut page = ListPresenter::new(ItemCollection::new(adapter), HeadlessSurface::new());
    page.start(fragment).expect("start");
    page
}

/// Type `title` into the new-item field and press Enter.
pub fn create(page: &mut Page, title: &str) -> ItemId {
    page.create_on_enter(Key::Enter, title)
        .expect("create")
        .expect("non-blank title creates an item")
}
