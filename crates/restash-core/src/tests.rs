#[cfg(test)]
mod tests {
    use crate::effects::{effect, on_unmount};
    use crate::effects_ext::keyed_effect;
    use crate::runtime::{Composition, remember, remember_with_key};
    use crate::scope::Scope;
    use crate::signal::signal;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let seen = Rc::new(Cell::new(0));

        let sub = sig.subscribe({
            let seen = seen.clone();
            move |v| seen.set(*v)
        });

        sig.set(42);
        assert_eq!(seen.get(), 42);

        drop(sub);
        sig.set(7);
        assert_eq!(seen.get(), 42); // released
    }

    #[test]
    fn test_signal_subscribers_run_in_order() {
        let sig = signal(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let _a = sig.subscribe({
            let order = order.clone();
            move |_| order.borrow_mut().push("a")
        });
        let _b = sig.subscribe({
            let order = order.clone();
            move |_| order.borrow_mut().push("b")
        });

        sig.set(1);
        assert_eq!(*order.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let cleaned_up = Rc::new(Cell::new(false));

        let scope = Scope::new();
        let cleaned_up_clone = cleaned_up.clone();
        scope.add_disposer(move || {
            cleaned_up_clone.set(true);
        });

        assert!(!cleaned_up.get());
        scope.dispose();
        assert!(cleaned_up.get());
    }

    #[test]
    fn test_scope_disposes_children_first() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let parent = Scope::new();
        let child = parent.child();
        child.add_disposer({
            let order = order.clone();
            move || order.borrow_mut().push("child")
        });
        parent.add_disposer({
            let order = order.clone();
            move || order.borrow_mut().push("parent")
        });

        parent.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn test_effect_cleanup_registers_with_current_scope() {
        let cleaned = Rc::new(Cell::new(false));

        let scope = Scope::new();
        scope.run(|| {
            let cleaned = cleaned.clone();
            effect(move || on_unmount(move || cleaned.set(true)));
        });

        assert!(!cleaned.get());
        scope.dispose();
        assert!(cleaned.get());
    }

    #[test]
    fn test_slot_remember_is_stable_across_frames() {
        let comp = Composition::new();

        let first = comp.frame(|| remember(|| RefCell::new(1)));
        let again = comp.frame(|| remember(|| RefCell::new(2)));

        // same slot, initializer not re-run
        assert!(Rc::ptr_eq(&first, &again));
        assert_eq!(*again.borrow(), 1);

        comp.dispose();
    }

    #[test]
    fn test_key_based_remember() {
        let val1 = remember_with_key("test", || 42);
        let val2 = remember_with_key("test", || 100);

        // Should return the same instance
        assert_eq!(*val1, 42);
        assert_eq!(*val2, 42); // Not 100, because key exists
    }

    #[test]
    fn test_keyed_effect_reruns_on_key_change_and_cleans_up_on_unmount() {
        let comp = Composition::new();
        let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

        let frame = |key: &str| {
            let key = key.to_string();
            let log = log.clone();
            comp.frame(move || {
                let body_log = log.clone();
                let body_key = key.clone();
                keyed_effect(key, move || {
                    body_log.borrow_mut().push(format!("subscribe {body_key}"));
                    let down_log = body_log.clone();
                    on_unmount(move || {
                        down_log.borrow_mut().push(format!("release {body_key}"));
                    })
                });
            });
        };

        frame("k1");
        frame("k1"); // unchanged key: no re-run
        frame("k2"); // previous cleanup runs before the new body
        comp.dispose();

        assert_eq!(
            *log.borrow(),
            vec!["subscribe k1", "release k1", "subscribe k2", "release k2"]
        );
    }
}
