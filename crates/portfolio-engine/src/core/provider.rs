//! Provider scope for the mode store.
//!
//! Components resolve the store with `use_mode()` instead of threading a
//! handle through every constructor. Resolution only works while a
//! `ModeProvider` guard is alive on the current thread; anywhere else it is
//! a wiring bug and fails loudly.

use std::cell::RefCell;

use crate::core::mode::ModeStore;
use crate::error::ModeError;

thread_local! {
    static PROVIDED: RefCell<Vec<ModeStore>> = const { RefCell::new(Vec::new()) };
}

/// Scope guard that makes a store resolvable via `use_mode()`.
///
/// Providers nest: the innermost live one wins, and dropping it restores
/// the outer one.
#[must_use = "the store is only provided while the guard is alive"]
pub struct ModeProvider {
    store: ModeStore,
    depth: usize,
}

impl ModeProvider {
    /// Provide a fresh store, initially inactive.
    pub fn new() -> Self {
        Self::install(ModeStore::new())
    }

    /// Provide an existing store.
    pub fn install(store: ModeStore) -> Self {
        let depth = PROVIDED.with(|stack| {
            let mut stack = stack.borrow_mut();
            stack.push(store.clone());
            stack.len() - 1
        });
        log::debug!("mode provider installed at depth {}", depth);
        Self { store, depth }
    }

    pub fn store(&self) -> &ModeStore {
        &self.store
    }
}

impl Default for ModeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ModeProvider {
    fn drop(&mut self) {
        // Truncate rather than pop so a leaked inner guard cannot keep
        // shadowing this scope's parent.
        PROVIDED.with(|stack| stack.borrow_mut().truncate(self.depth));
    }
}

/// Resolve the innermost provided store.
pub fn try_use_mode() -> Result<ModeStore, ModeError> {
    PROVIDED
        .with(|stack| stack.borrow().last().cloned())
        .ok_or(ModeError::OutsideProvider)
}

/// Resolve the innermost provided store.
///
/// # Panics
///
/// Panics when no `ModeProvider` is alive on this thread. That is a wiring
/// error in the caller, not a runtime condition.
pub fn use_mode() -> ModeStore {
    match try_use_mode() {
        Ok(store) => store,
        Err(err) => panic!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_provider_is_an_error() {
        assert_eq!(try_use_mode().err(), Some(ModeError::OutsideProvider));
    }

    #[test]
    #[should_panic(expected = "use_mode must be called within a ModeProvider scope")]
    fn use_mode_outside_provider_panics() {
        let _ = use_mode();
    }

    #[test]
    fn resolves_provided_store() {
        let provider = ModeProvider::new();
        let store = use_mode();
        assert!(store.same_store(provider.store()));
        store.toggle();
        assert!(provider.store().get_active());
    }

    #[test]
    fn dropping_provider_ends_scope() {
        {
            let _provider = ModeProvider::new();
            assert!(try_use_mode().is_ok());
        }
        assert!(try_use_mode().is_err());
    }

    #[test]
    fn inner_provider_shadows_outer() {
        let outer = ModeProvider::new();
        {
            let inner = ModeProvider::new();
            assert!(use_mode().same_store(inner.store()));
        }
        assert!(use_mode().same_store(outer.store()));
    }

    #[test]
    fn install_shares_existing_store() {
        let store = ModeStore::new();
        store.set_active(true);
        let _provider = ModeProvider::install(store.clone());
        assert!(use_mode().get_active());
    }
}
