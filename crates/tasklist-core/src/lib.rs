//! tasklist-core library.
//!
//! Task records, the ordered collection that owns them, the change
//! notifications it fires, and the key-value persistence underneath.
//!
//! # Conventions
//!
//! - **Errors**: storage failures are `StoreError`; configuration uses `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod collection;
pub mod config;
pub mod error;
pub mod event;
pub mod model;
pub mod storage;

pub use collection::{ItemCollection, Stats};
pub use error::{ErrorCode, StoreError};
pub use event::{ChangedFields, CollectionEvent, EventBus, ListenerId};
pub use model::{Item, ItemId, NewItem};
pub use storage::{KeyValueStore, StorageAdapter};
