use std::sync::Arc;

use sqlx::SqlitePool;

use crate::extraction::SyllabusExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    /// Pluggable extraction client. Production wires `GeminiExtractor`;
    /// handler tests substitute a stub.
    pub extractor: Arc<dyn SyllabusExtractor>,
}
