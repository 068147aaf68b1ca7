//! Shared application state for all routes.

use crate::store::OrderStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
}

impl AppState {
    pub fn new(store: impl OrderStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
