use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::RawDocument;
use crate::ingest::IngestOutcome;
use crate::models::resume::{NewParsedResume, ParsedResumeRow};
use crate::state::AppState;

const FILE_FIELD: &str = "file";

/// POST /api/v1/resumes/ingest
///
/// Multipart upload. The `file` part is the document; every other part is
/// caller metadata stored alongside the segments without interpretation.
/// Accepted → 200, rejected → 422 with the rejection reason.
pub async fn handle_ingest(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<IngestOutcome, AppError> {
    let mut document: Option<RawDocument> = None;
    let mut metadata = Map::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == FILE_FIELD {
            let filename = field.file_name().unwrap_or_default().to_string();
            let mime_type = field.content_type().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(multipart_error)?;
            document = Some(RawDocument::new(bytes, mime_type, filename));
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            metadata.insert(name, Value::String(value));
        }
    }

    let document = document
        .ok_or_else(|| AppError::Validation(format!("multipart part '{FILE_FIELD}' is required")))?;
    if document.bytes.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    match state.pipeline.run(&document).await {
        Ok(resume) => {
            let row = state
                .sink
                .persist(NewParsedResume {
                    filename: document.filename.clone(),
                    mime_type: document.mime_type.clone(),
                    segments: resume.segments.clone(),
                    metadata,
                    used_fallback: resume.used_fallback,
                })
                .await?;
            info!("Stored parsed resume {} ({})", row.id, row.filename);
            Ok(IngestOutcome::accepted(row.id, resume))
        }
        Err(e) => Ok(IngestOutcome::rejected(&e)),
    }
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ParsedResumeRow>, AppError> {
    let row = state
        .sink
        .fetch(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Parsed resume {id} not found")))?;
    Ok(Json(row))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("Malformed multipart body: {}", e.body_text()))
    }
}
