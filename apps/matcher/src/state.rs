use std::sync::Arc;

use crate::config::Config;
use crate::matching::MatchEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Holds the single embedding provider and the data source.
    pub engine: Arc<MatchEngine>,
}
