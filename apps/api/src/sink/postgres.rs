use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{NewParsedResume, ParsedResumeRow};
use crate::sink::ResumeSink;

pub struct PgResumeSink {
    pool: PgPool,
}

impl PgResumeSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeSink for PgResumeSink {
    async fn persist(&self, resume: NewParsedResume) -> Result<ParsedResumeRow, AppError> {
        let row = sqlx::query_as::<_, ParsedResumeRow>(
            r#"
            INSERT INTO parsed_resumes
                (id, filename, mime_type, segments, metadata, used_fallback)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, filename, mime_type, segments, metadata, used_fallback, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&resume.filename)
        .bind(&resume.mime_type)
        .bind(Json(&resume.segments))
        .bind(Json(&resume.metadata))
        .bind(resume.used_fallback)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<ParsedResumeRow>, AppError> {
        let row = sqlx::query_as::<_, ParsedResumeRow>(
            "SELECT id, filename, mime_type, segments, metadata, used_fallback, created_at \
             FROM parsed_resumes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
