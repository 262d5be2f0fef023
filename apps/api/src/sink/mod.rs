//! Persistence sink for accepted resumes.
//!
//! The pipeline hands over segments plus caller metadata and gets back the
//! stored row. `AppState` holds an `Arc<dyn ResumeSink>`: Postgres when
//! `DATABASE_URL` is set, in-memory otherwise.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewParsedResume, ParsedResumeRow};

pub use memory::MemoryResumeSink;
pub use postgres::PgResumeSink;

#[async_trait]
pub trait ResumeSink: Send + Sync {
    async fn persist(&self, resume: NewParsedResume) -> Result<ParsedResumeRow, AppError>;

    async fn fetch(&self, id: Uuid) -> Result<Option<ParsedResumeRow>, AppError>;
}
