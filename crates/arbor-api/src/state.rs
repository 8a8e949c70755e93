//! Shared application state handed to every handler.

use std::sync::Arc;

use arbor_db::service::ArborService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ArborService>,
    pub db_path: String,
}

impl AppState {
    #[must_use]
    pub fn new(service: Arc<ArborService>, db_path: String) -> Self {
        Self { service, db_path }
    }
}
