//! Shared application state for all routes.

use crate::config::ServerConfig;
use crate::store::BookmarkStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn BookmarkStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn BookmarkStore>, config: ServerConfig) -> Self {
        AppState {
            store,
            config: Arc::new(config),
        }
    }
}
