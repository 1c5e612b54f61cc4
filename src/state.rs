//! Application state shared by all handlers.

use std::sync::Arc;

use crate::db::DbPool;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Languages and settings database
    pub db: DbPool,

    /// Site base URL, shown as the prefix of each suffix field
    pub base_url: Arc<str>,
}

impl AppState {
    pub fn new(db: DbPool, base_url: &str) -> Self {
        Self {
            db,
            base_url: Arc::from(base_url),
        }
    }

    /// Text shown in front of a suffix input, e.g. `https://example.com/index_`
    pub fn field_prefix(&self) -> String {
        format!("{}/index_", self.base_url)
    }
}
