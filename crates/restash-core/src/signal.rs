use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type SubId = u64;

/// Observable value. Cloning the handle shares the underlying state.
///
/// Subscribers are invoked synchronously, in subscription order, every time
/// the value is replaced or updated in place.
#[derive(Clone)]
pub struct Signal<T: 'static>(Rc<RefCell<Inner<T>>>);

struct Inner<T> {
    value: T,
    next_sub: SubId,
    subs: Vec<(SubId, Rc<dyn Fn(&T)>)>,
}

impl<T> Signal<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(Inner {
            value,
            next_sub: 0,
            subs: Vec::new(),
        })))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().value.clone()
    }

    /// Read the value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow().value)
    }

    pub fn set(&self, v: T) {
        self.0.borrow_mut().value = v;
        self.notify();
    }

    pub fn update<F: FnOnce(&mut T)>(&self, f: F) {
        f(&mut self.0.borrow_mut().value);
        self.notify();
    }

    /// Register a change callback. The callback stays registered for as long
    /// as the returned guard is alive; dropping the guard removes it.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SignalSubscription<T> {
        let mut inner = self.0.borrow_mut();
        let id = inner.next_sub;
        inner.next_sub += 1;
        inner.subs.push((id, Rc::new(f)));
        SignalSubscription {
            inner: Rc::downgrade(&self.0),
            id,
        }
    }

    fn notify(&self) {
        // snapshot so a callback may subscribe without invalidating the walk
        let subs: Vec<Rc<dyn Fn(&T)>> =
            self.0.borrow().subs.iter().map(|(_, f)| f.clone()).collect();
        for f in subs {
            let inner = self.0.borrow();
            f(&inner.value);
        }
    }
}

/// RAII guard for a [`Signal`] subscription.
pub struct SignalSubscription<T: 'static> {
    inner: Weak<RefCell<Inner<T>>>,
    id: SubId,
}

impl<T> SignalSubscription<T> {
    /// Remove the callback now rather than at end of scope.
    pub fn unsubscribe(self) {}
}

impl<T> Drop for SignalSubscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.borrow_mut().subs.retain(|(id, _)| *id != self.id);
        }
    }
}

pub fn signal<T>(t: T) -> Signal<T> {
    Signal::new(t)
}
