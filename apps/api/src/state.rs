use std::sync::Arc;

use crate::ingest::IngestPipeline;
use crate::sink::ResumeSink;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<IngestPipeline>,
    /// Where accepted resumes go. Postgres in production, memory otherwise.
    pub sink: Arc<dyn ResumeSink>,
}
