use std::sync::Arc;

use crate::config::Config;
use crate::scoring::engine::ScoreEngine;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Dictionary, video catalog, entity recognizer and embedding model, loaded once.
    pub engine: Arc<ScoreEngine>,
}
