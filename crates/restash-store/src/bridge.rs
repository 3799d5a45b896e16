use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Payload of the host environment's native "storage changed" signal, as
/// delivered to every context sharing the store except the one that wrote.
/// The payload is always raw: receivers decode it themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalChange {
    pub key: String,
    /// `Some` carries the new raw string; `None` denotes deletion.
    pub new_value: Option<String>,
}

pub type BridgeHandler = Rc<dyn Fn(&ExternalChange)>;

/// Seam for the native cross-context signal. Implementations wrap whatever
/// the host environment offers; delivery timing and ordering relative to
/// other contexts is the host's business.
pub trait ContextBridge {
    fn subscribe(&self, handler: BridgeHandler) -> BridgeSubscription;
}

/// Bridge for environments with no cross-context facility.
#[derive(Clone, Copy, Default)]
pub struct NullBridge;

impl ContextBridge for NullBridge {
    fn subscribe(&self, _handler: BridgeHandler) -> BridgeSubscription {
        BridgeSubscription(None)
    }
}

/// In-memory bridge. `emit` plays the role of the host delivering a change
/// made in another context; nothing is persisted on this side.
#[derive(Clone, Default)]
pub struct LoopbackBridge(Rc<RefCell<BridgeInner>>);

#[derive(Default)]
struct BridgeInner {
    next_id: u64,
    handlers: Vec<(u64, BridgeHandler)>,
}

impl LoopbackBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, key: &str, new_value: Option<&str>) {
        let change = ExternalChange {
            key: key.to_owned(),
            new_value: new_value.map(str::to_owned),
        };
        let handlers: Vec<(u64, BridgeHandler)> = self.0.borrow().handlers.clone();
        for (_, handler) in handlers {
            handler(&change);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.0.borrow().handlers.len()
    }
}

impl ContextBridge for LoopbackBridge {
    fn subscribe(&self, handler: BridgeHandler) -> BridgeSubscription {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.handlers.push((id, handler));
        BridgeSubscription(Some(BridgeSub {
            bridge: Rc::downgrade(&self.0),
            id,
        }))
    }
}

/// RAII guard for a bridge handler; inert when the bridge has no handlers
/// to manage (see [`NullBridge`]).
pub struct BridgeSubscription(Option<BridgeSub>);

struct BridgeSub {
    bridge: Weak<RefCell<BridgeInner>>,
    id: u64,
}

impl BridgeSubscription {
    pub fn unsubscribe(self) {}
}

impl Drop for BridgeSub {
    fn drop(&mut self) {
        if let Some(bridge) = self.bridge.upgrade() {
            bridge.borrow_mut().handlers.retain(|(id, _)| *id != self.id);
        }
    }
}
