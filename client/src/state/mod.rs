//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`chat`, `history`, `ui`) so individual
//! components can depend on small focused models. Transitions are plain
//! methods on these structs. The async drivers in `pages::chat_actions` reach
//! them through [`StateCell`], which `RwSignal` implements.

pub mod chat;
pub mod history;
pub mod ui;

use leptos::prelude::*;

/// Shared, interior-mutable handle to a state struct.
///
/// Returns `None` when the backing storage is gone (a disposed signal), in
/// which case the caller drops the update.
pub trait StateCell<T> {
    /// Mutate the state and return the closure's result.
    fn apply<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
}

impl<T: Send + Sync + 'static> StateCell<T> for RwSignal<T> {
    fn apply<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.try_update(f)
    }
}
