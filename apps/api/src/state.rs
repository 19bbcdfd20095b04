use std::sync::Arc;

use crate::config::Config;
use crate::letter::session::SessionStore;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text generator. Default: OllamaClient. Tests inject a mock.
    pub llm: Arc<dyn TextGenerator>,
    pub config: Config,
    /// In-memory letter sessions; process-local, no persistence.
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(llm: Arc<dyn TextGenerator>, config: Config) -> Self {
        Self {
            llm,
            config,
            sessions: SessionStore::new(),
        }
    }
}
