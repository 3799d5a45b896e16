//! # Signals, slots, and effects
//!
//! Restash binds observers to stored values through a small reactive core
//! rather than any particular UI framework. There are three pieces:
//!
//! - `Signal<T>` — observable, reactive value.
//! - `remember*` — lifecycle‑aware storage bound to composition.
//! - `effect` / `keyed_effect` — side‑effects with cleanup.
//!
//! ## Signals
//!
//! `Signal<T>` is a cloneable handle to a piece of state:
//!
//! ```rust
//! use restash_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! Subscribers hear about every change and release themselves when their
//! guard drops:
//!
//! ```rust
//! use restash_core::*;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let count = signal(0);
//! let seen = Rc::new(Cell::new(0));
//!
//! let sub = count.subscribe({
//!     let seen = seen.clone();
//!     move |v| seen.set(*v)
//! });
//! count.set(7);
//! assert_eq!(seen.get(), 7);
//!
//! sub.unsubscribe();
//! count.set(9);
//! assert_eq!(seen.get(), 7); // no longer listening
//! ```
//!
//! ## Remembered state
//!
//! Observer-local state lives in `remember_*` slots rather than globals.
//! `remember` is order‑based: the Nth call in a composition frame always
//! refers to the Nth stored value. `remember_with_key` is key‑based and
//! stable across conditional branches. A [`Composition`] re-runs a build
//! function over time, resetting the slot cursor each frame:
//!
//! ```rust
//! use restash_core::*;
//! use std::cell::RefCell;
//!
//! let comp = Composition::new();
//! comp.frame(|| remember(|| RefCell::new(1)));
//! let slot = comp.frame(|| remember(|| RefCell::new(2)));
//! assert_eq!(*slot.borrow(), 1); // same slot, initializer not re-run
//! comp.dispose();
//! ```
//!
//! ## Effects and cleanup
//!
//! `effect` runs once and returns a `Dispose` guard that is also registered
//! with the current [`Scope`], so disposal of the scope tears it down.
//! `keyed_effect` re-runs its body when the key changes, running the
//! previous cleanup first: the building block for anything that must
//! re-subscribe when what it watches changes.

pub mod effects;
pub mod effects_ext;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod signal;
pub mod tests;

pub use effects::*;
pub use effects_ext::*;
pub use runtime::*;
pub use scope::*;
pub use signal::*;
