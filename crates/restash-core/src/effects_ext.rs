use crate::{Dispose, effect, on_unmount, remember};
use std::cell::{Cell, RefCell};

/// Effect keyed on a value: the body runs when the key first appears and
/// again whenever it changes, with the previous cleanup run first. The
/// last cleanup also runs on scope unmount.
pub fn keyed_effect<K: PartialEq + Clone + 'static>(
    key: K,
    body: impl FnOnce() -> Dispose + 'static,
) {
    // Slot-based, so each callsite in a stable composition gets its own state.
    let last_key = remember(|| RefCell::new(None::<K>));
    let cleanup_slot = remember(|| RefCell::new(None::<Dispose>));
    let installed = remember(|| Cell::new(false));

    // Install a single unmount disposer for this callsite.
    if !installed.get() {
        installed.set(true);
        let cleanup_slot = cleanup_slot.clone();
        effect(move || {
            on_unmount(move || {
                if let Some(d) = cleanup_slot.borrow_mut().take() {
                    d.run();
                }
            })
        });
    }

    // Key change: cleanup previous + run new body
    let changed = last_key.borrow().as_ref() != Some(&key);
    if changed {
        *last_key.borrow_mut() = Some(key);

        if let Some(d) = cleanup_slot.borrow_mut().take() {
            d.run();
        }

        let d = body();
        *cleanup_slot.borrow_mut() = Some(d);
    }
}
