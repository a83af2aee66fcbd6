//! Shared application state.

use std::sync::Arc;

use crate::store::IngredientStore;

/// State shared across all handlers.
///
/// The store is held behind a trait object so the router can run against
/// Postgres in production and the in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn IngredientStore>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn IngredientStore>) -> Self {
        Self { store }
    }
}
