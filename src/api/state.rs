use std::sync::Arc;

use crate::config::Config;
use crate::db::{BlogStore, InMemoryStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BlogStore>,
    pub config: Arc<Config>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    /// Creates state backed by an empty in-memory store
    pub fn new(config: Config) -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()), config)
    }

    /// Creates state backed by the given store
    pub fn with_store(store: Arc<dyn BlogStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
