//! # Storage-synchronized state
//!
//! One persisted value per string key, mirrored into any number of live
//! bindings. The store is the source of truth; there is no coordinator.
//! Three pieces make that work:
//!
//! - [`ChangeBus`] — fan-out of set/delete announcements, independent of
//!   the persistence layer.
//! - [`Storage`] — the accessor: serializes, persists, then announces.
//!   The only supported mutation path.
//! - [`StoredState`] / [`use_stored`] — a per-observer binding that reads
//!   its key on mount, tracks both local announcements and the
//!   cross-context signal, and tears its subscriptions down on disposal.
//!
//! ```rust
//! use restash_store::{Storage, StoredState};
//! use serde_json::json;
//!
//! let storage = Storage::in_memory();
//!
//! let name = StoredState::bind(&storage, "name", Some(json!("Jane")));
//! assert_eq!(name.value(), json!("Jane"));   // seeded into the store
//!
//! storage.write("name", "Joe").unwrap();
//! assert_eq!(name.value(), json!("Joe"));    // every binding converges
//!
//! name.delete().unwrap();
//! assert_eq!(name.value(), json!("Jane"));   // falls back to the initial
//! ```
//!
//! Values are JSON ([`serde_json::Value`]). A stored string that does not
//! parse is presented verbatim as a string; reads never fail. Writes and
//! deletes are fallible ([`StorageError`]) and never retried.
//!
//! The persistence layer and the cross-context signal are seams:
//! [`StorageBackend`] is whatever synchronous key-value store the host
//! offers, and [`ContextBridge`] is however the host tells this context
//! about other contexts' writes ([`LoopbackBridge`] stands in for tests).
//! Writes that bypass [`Storage`] are not announced and not supported.

pub mod backend;
pub mod binding;
pub mod bridge;
pub mod error;
pub mod events;
pub mod storage;
pub mod value;

pub use backend::{MemoryBackend, StorageBackend};
pub use binding::{StoredHandle, StoredState, use_stored, use_stored_in};
pub use bridge::{BridgeHandler, BridgeSubscription, ContextBridge, ExternalChange, LoopbackBridge, NullBridge};
pub use error::StorageError;
pub use events::{ChangeBus, ListenerId, StorageChange, Subscription};
pub use storage::{Storage, default_storage, delete_from_storage, install_default, write_storage};
pub use value::{StoredValue, decode};
