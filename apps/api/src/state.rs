use std::sync::Arc;

use crate::config::Config;
use crate::generation::service::ContentService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Built once at startup around the shared generation backend.
    pub content: Arc<ContentService>,
    pub config: Config,
}
