use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewParsedResume, ParsedResumeRow};
use crate::sink::ResumeSink;

/// Process-local sink. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryResumeSink {
    rows: RwLock<HashMap<Uuid, ParsedResumeRow>>,
}

impl MemoryResumeSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeSink for MemoryResumeSink {
    async fn persist(&self, resume: NewParsedResume) -> Result<ParsedResumeRow, AppError> {
        let segments = serde_json::to_value(&resume.segments)
            .map_err(|e| AppError::Internal(e.into()))?;
        let row = ParsedResumeRow {
            id: Uuid::new_v4(),
            filename: resume.filename,
            mime_type: resume.mime_type,
            segments,
            metadata: Value::Object(resume.metadata),
            used_fallback: resume.used_fallback,
            created_at: Utc::now(),
        };
        self.rows.write().await.insert(row.id, row.clone());
        Ok(row)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<ParsedResumeRow>, AppError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }
}
