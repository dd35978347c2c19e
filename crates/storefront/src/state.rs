//! Application state shared across handlers.

use std::sync::Arc;

use plant_shop_core::Pricer;

use crate::db::OrderStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and gives handlers the
/// pricer and the order store they were built with.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pricer: Pricer,
    store: Arc<dyn OrderStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `pricer` - Pricer holding the tax, shipping, and unit-price tables
    /// * `store` - Where priced orders are persisted
    #[must_use]
    pub fn new(pricer: Pricer, store: Arc<dyn OrderStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { pricer, store }),
        }
    }

    /// Get a reference to the pricer.
    #[must_use]
    pub fn pricer(&self) -> &Pricer {
        &self.inner.pricer
    }

    /// Get a shared handle to the order store.
    ///
    /// Returned as an `Arc` so it can move into a spawned task.
    #[must_use]
    pub fn store(&self) -> Arc<dyn OrderStore> {
        Arc::clone(&self.inner.store)
    }
}
