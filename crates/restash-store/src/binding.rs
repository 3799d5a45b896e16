use std::cell::RefCell;
use std::rc::Rc;

use restash_core::{Signal, keyed_effect, on_unmount, remember};
use serde::Serialize;
use serde_json::Value;

use crate::bridge::BridgeSubscription;
use crate::error::StorageError;
use crate::events::Subscription;
use crate::storage::{Storage, default_storage};
use crate::value::{StoredValue, decode};

/// One observer's live view of a single key.
///
/// While bound, the state holds two subscriptions (the local change bus
/// and the cross-context bridge) and mirrors every matching set/delete
/// into its local signal. Rebinding to a new key releases both
/// subscriptions before reading and subscribing afresh; disposal releases
/// them for good.
pub struct StoredState {
    storage: Storage,
    key: RefCell<String>,
    initial: RefCell<Option<Value>>,
    local: Signal<Option<Value>>,
    bus_sub: RefCell<Option<Subscription>>,
    bridge_sub: RefCell<Option<BridgeSubscription>>,
}

impl StoredState {
    /// An unbound state; call [`rebind`](Self::rebind) to point it at a key.
    pub fn detached(storage: Storage) -> Self {
        Self {
            storage,
            key: RefCell::new(String::new()),
            initial: RefCell::new(None),
            local: Signal::new(None),
            bus_sub: RefCell::new(None),
            bridge_sub: RefCell::new(None),
        }
    }

    /// Bind to `key`: read the stored value (seeding `initial` if the slot
    /// is empty) and start tracking changes.
    pub fn bind(storage: &Storage, key: &str, initial: Option<Value>) -> Rc<Self> {
        let state = Rc::new(Self::detached(storage.clone()));
        state.rebind(key, initial);
        state
    }

    /// Point at a (possibly different) key. Old subscriptions are released
    /// first; then the new key gets a fresh read, seed, and subscriptions.
    pub fn rebind(&self, key: &str, initial: Option<Value>) {
        self.release();
        *self.key.borrow_mut() = key.to_owned();
        *self.initial.borrow_mut() = initial;
        self.attach();
    }

    fn attach(&self) {
        let key = self.key.borrow().clone();

        // Subscribe before reading, so our own seed write below is observed
        // the same way sibling bindings observe it.
        let bus_sub = {
            let key = key.clone();
            let local = self.local.clone();
            self.storage.subscribe(move |change| {
                if change.key == key {
                    local.set(change.value.clone());
                }
            })
        };
        let bridge_sub = {
            let key = key.clone();
            let local = self.local.clone();
            self.storage.subscribe_external(Rc::new(move |change| {
                if change.key == key {
                    // external payloads are raw and must be decoded here
                    local.set(change.new_value.as_deref().map(decode));
                }
            }))
        };
        *self.bus_sub.borrow_mut() = Some(bus_sub);
        *self.bridge_sub.borrow_mut() = Some(bridge_sub);

        match self.storage.read(&key) {
            StoredValue::Decoded(v) => self.local.set(Some(v)),
            StoredValue::Raw(s) => self.local.set(Some(Value::String(s))),
            StoredValue::Absent => {
                let initial = self.initial.borrow().clone();
                self.local.set(initial.clone());
                if let Some(seed) = initial
                    && let Err(err) = self.storage.write_value(&key, seed)
                {
                    // mount must not fail; the observer still sees the initial
                    log::warn!("seeding '{key}' failed: {err}");
                }
            }
        }
    }

    /// Stop tracking changes. The last local value stays readable; the
    /// binding no longer reacts to anything.
    pub fn dispose(&self) {
        self.release();
    }

    fn release(&self) {
        self.bus_sub.borrow_mut().take();
        self.bridge_sub.borrow_mut().take();
    }

    pub fn key(&self) -> String {
        self.key.borrow().clone()
    }

    /// The value presented to the observer: the local state, or the initial
    /// value while no value is held, or `Null` when neither exists.
    pub fn value(&self) -> Value {
        self.local
            .get()
            .or_else(|| self.initial.borrow().clone())
            .unwrap_or(Value::Null)
    }

    /// The observable local state; `None` while the binding holds no value.
    /// Hosts subscribe here to re-render on change.
    pub fn signal(&self) -> Signal<Option<Value>> {
        self.local.clone()
    }

    /// Write through the accessor under the binding's key at call time.
    pub fn set<T: Serialize>(&self, value: T) -> Result<(), StorageError> {
        let key = self.key.borrow().clone();
        self.storage.write(&key, value)
    }

    /// Remove the binding's key from the store.
    pub fn delete(&self) -> Result<(), StorageError> {
        let key = self.key.borrow().clone();
        self.storage.remove(&key)
    }
}

/// Handle returned by [`use_stored`]; clones share the binding.
#[derive(Clone)]
pub struct StoredHandle {
    state: Rc<StoredState>,
}

impl StoredHandle {
    pub fn value(&self) -> Value {
        self.state.value()
    }

    pub fn set<T: Serialize>(&self, value: T) -> Result<(), StorageError> {
        self.state.set(value)
    }

    pub fn delete(&self) -> Result<(), StorageError> {
        self.state.delete()
    }

    pub fn key(&self) -> String {
        self.state.key()
    }

    pub fn signal(&self) -> Signal<Option<Value>> {
        self.state.signal()
    }
}

/// Composition-style entry point against the default storage.
pub fn use_stored(key: &str, initial: impl Into<Option<Value>>) -> StoredHandle {
    use_stored_in(&default_storage(), key, initial)
}

/// Bind the calling composition slot to `key` in `storage`.
///
/// The binding lives in a `remember` slot, so the handle (and its setter
/// and deleter) is stable across recompositions. A keyed effect rebinds it
/// whenever `key` changes, releasing the old subscriptions first, and
/// disposes it when the composition's scope unmounts.
pub fn use_stored_in(
    storage: &Storage,
    key: &str,
    initial: impl Into<Option<Value>>,
) -> StoredHandle {
    let initial = initial.into();

    let state = remember({
        let storage = storage.clone();
        move || StoredState::detached(storage)
    });

    keyed_effect(key.to_owned(), {
        let state = state.clone();
        let key = key.to_owned();
        move || {
            state.rebind(&key, initial);
            let state = state.clone();
            on_unmount(move || state.dispose())
        }
    });

    StoredHandle { state }
}
