use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::{Rc, Weak};

use serde_json::Value;

/// A set/delete announcement for one key.
///
/// Locally-originated events carry the value already decoded, so listeners
/// never re-parse what the writer just serialized. A delete carries no value.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageChange {
    pub key: String,
    /// `Some` for a set, `None` for a delete.
    pub value: Option<Value>,
}

impl StorageChange {
    pub fn set(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: key.into(),
            value: Some(value),
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }
}

pub type ListenerId = u64;
type Listener = Rc<dyn Fn(&StorageChange)>;

/// Fan-out channel for [`StorageChange`] events, independent of the
/// persistence layer. Delivery is synchronous and in subscription order.
#[derive(Clone, Default)]
pub struct ChangeBus(Rc<RefCell<BusInner>>);

#[derive(Default)]
struct BusInner {
    next_id: ListenerId,
    listeners: Vec<(ListenerId, Listener)>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the returned guard is
    /// dropped; each subscription is released independently.
    pub fn subscribe(&self, f: impl Fn(&StorageChange) + 'static) -> Subscription {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(f)));
        Subscription {
            bus: Rc::downgrade(&self.0),
            id,
        }
    }

    /// Deliver `event` to every listener registered when the call starts.
    ///
    /// A panicking listener is logged and skipped; the remaining listeners
    /// still receive the event.
    pub fn publish(&self, event: &StorageChange) {
        let listeners: Vec<(ListenerId, Listener)> = self.0.borrow().listeners.clone();
        for (id, listener) in listeners {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| listener(event))) {
                log::warn!(
                    "change listener {id} panicked on key '{}': {}",
                    event.key,
                    panic_message(payload.as_ref())
                );
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.0.borrow().listeners.len()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    }
}

/// RAII guard for a [`ChangeBus`] listener.
pub struct Subscription {
    bus: Weak<RefCell<BusInner>>,
    id: ListenerId,
}

impl Subscription {
    /// Remove the listener now rather than at end of scope.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
