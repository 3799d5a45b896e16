use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;

use crate::backend::{MemoryBackend, StorageBackend};
use crate::bridge::{BridgeHandler, BridgeSubscription, ContextBridge, NullBridge};
use crate::error::StorageError;
use crate::events::{ChangeBus, StorageChange, Subscription};
use crate::value::StoredValue;

/// The storage accessor: the only supported path by which values enter or
/// leave the store. Every successful mutation is announced on the change
/// bus before the call returns.
///
/// Cloning the handle shares the backend, bus, and bridge.
#[derive(Clone)]
pub struct Storage {
    inner: Rc<StorageInner>,
}

struct StorageInner {
    backend: Box<dyn StorageBackend>,
    bus: ChangeBus,
    bridge: Box<dyn ContextBridge>,
}

impl Storage {
    pub fn new(
        backend: impl StorageBackend + 'static,
        bridge: impl ContextBridge + 'static,
    ) -> Self {
        Self {
            inner: Rc::new(StorageInner {
                backend: Box::new(backend),
                bus: ChangeBus::new(),
                bridge: Box::new(bridge),
            }),
        }
    }

    /// Memory-backed storage with no cross-context signal.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new(), NullBridge)
    }

    /// Serialize `value` and persist it under `key`.
    pub fn write<T: Serialize>(&self, key: &str, value: T) -> Result<(), StorageError> {
        self.write_value(key, serde_json::to_value(value)?)
    }

    /// Persist an already-decoded value. The published event carries this
    /// value as-is, so listeners never redo the decode.
    pub fn write_value(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let raw = value.to_string();
        self.inner.backend.set(key, &raw)?;
        log::trace!("wrote '{key}' ({} bytes)", raw.len());
        self.inner.bus.publish(&StorageChange::set(key, value));
        Ok(())
    }

    /// Delete `key` from the store. Idempotent: removing an absent key
    /// succeeds and still announces the deletion.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.backend.remove(key)?;
        log::trace!("removed '{key}'");
        self.inner.bus.publish(&StorageChange::delete(key));
        Ok(())
    }

    /// Tagged read of `key`. Never fails: a backend read error is logged
    /// and reads as absent.
    pub fn read(&self, key: &str) -> StoredValue {
        match self.inner.backend.get(key) {
            Ok(raw) => StoredValue::from_raw(raw),
            Err(err) => {
                log::warn!("read of '{key}' failed: {err}; treating as absent");
                StoredValue::Absent
            }
        }
    }

    /// Listen for locally-originated change events.
    pub fn subscribe(&self, f: impl Fn(&StorageChange) + 'static) -> Subscription {
        self.inner.bus.subscribe(f)
    }

    /// Listen for changes made in other contexts sharing the store.
    pub fn subscribe_external(&self, handler: BridgeHandler) -> BridgeSubscription {
        self.inner.bridge.subscribe(handler)
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.inner.bus
    }
}

thread_local! {
    static DEFAULT_STORAGE: RefCell<Option<Storage>> = const { RefCell::new(None) };
}

/// The process-wide default instance, created memory-backed on first use.
pub fn default_storage() -> Storage {
    DEFAULT_STORAGE.with(|slot| {
        slot.borrow_mut()
            .get_or_insert_with(Storage::in_memory)
            .clone()
    })
}

/// Replace the default instance (wire a real backend and bridge at
/// startup, before any binding mounts). Returns the previous one, whose
/// listeners keep working against the old instance.
pub fn install_default(storage: Storage) -> Option<Storage> {
    DEFAULT_STORAGE.with(|slot| slot.borrow_mut().replace(storage))
}

/// Write `value` under `key` through the default storage.
pub fn write_storage<T: Serialize>(key: &str, value: T) -> Result<(), StorageError> {
    default_storage().write(key, value)
}

/// Delete `key` through the default storage.
pub fn delete_from_storage(key: &str) -> Result<(), StorageError> {
    default_storage().remove(key)
}
