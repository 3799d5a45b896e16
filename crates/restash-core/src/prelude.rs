pub use crate::effects::{Dispose, effect, on_unmount};
pub use crate::effects_ext::keyed_effect;
pub use crate::runtime::{
    Composition, remember, remember_state, remember_state_with_key, remember_with_key,
};
pub use crate::scope::{Scope, current_scope};
pub use crate::signal::{Signal, SignalSubscription, signal};
