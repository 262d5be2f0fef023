// Resume ingestion: extraction → normalization → segmentation → validation.
// One document per call, strictly sequential; the only shared state is the
// read-only section header dictionary.

pub mod handlers;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::extraction::quality::{is_usable, QualityMode};
use crate::extraction::{ExtractionDispatcher, RawDocument};
use crate::sections::{normalize, segment, validate_segments, SegmentedResume};

/// Terminal rejection of a document. Recoverable extractor failures never
/// surface here; they are absorbed by the dispatcher's fallback chain.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("document is unreadable: {0}")]
    UnreadableDocument(String),

    #[error("no experience section found")]
    MissingExperienceSection,
}

/// Wire name of a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RejectionReason {
    UnreadableDocument,
    MissingExperienceSection,
}

impl IngestError {
    pub fn reason(&self) -> RejectionReason {
        match self {
            IngestError::UnreadableDocument(_) => RejectionReason::UnreadableDocument,
            IngestError::MissingExperienceSection => RejectionReason::MissingExperienceSection,
        }
    }
}

/// An accepted document.
#[derive(Debug, Clone)]
pub struct IngestedResume {
    pub segments: SegmentedResume,
    pub used_fallback: bool,
}

pub struct IngestPipeline {
    dispatcher: ExtractionDispatcher,
}

impl IngestPipeline {
    pub fn new(dispatcher: ExtractionDispatcher) -> Self {
        Self { dispatcher }
    }

    pub async fn run(&self, doc: &RawDocument) -> Result<IngestedResume, IngestError> {
        let extraction = self.dispatcher.extract(doc).await?;

        if !is_usable(&extraction.text, QualityMode::LengthAndAlnum) {
            warn!(
                "Rejecting {}: extracted text still below quality thresholds after fallback",
                doc.filename
            );
            return Err(IngestError::UnreadableDocument(
                "not enough readable text to segment".to_string(),
            ));
        }

        let normalized = normalize(&extraction.text);
        let segments = segment(&normalized);

        if let Err(e) = validate_segments(&segments) {
            warn!("Rejecting {}: {e}", doc.filename);
            return Err(e);
        }

        info!(
            "Accepted {}: {} normalized chars, sections {:?}, ocr={}",
            doc.filename,
            normalized.len_chars(),
            segments.populated(),
            extraction.used_fallback
        );

        Ok(IngestedResume {
            segments,
            used_fallback: extraction.used_fallback,
        })
    }
}

/// Verdict returned to the caller: either the segments of an accepted resume
/// or the reason it was rejected.
#[derive(Debug, Serialize)]
pub struct IngestOutcome {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_fallback: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<SegmentedResume>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<RejectionReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IngestOutcome {
    pub fn accepted(resume_id: Uuid, resume: IngestedResume) -> Self {
        Self {
            accepted: true,
            resume_id: Some(resume_id),
            used_fallback: Some(resume.used_fallback),
            segments: Some(resume.segments),
            reason: None,
            message: None,
        }
    }

    pub fn rejected(error: &IngestError) -> Self {
        Self {
            accepted: false,
            resume_id: None,
            used_fallback: None,
            segments: None,
            reason: Some(error.reason()),
            message: Some(error.to_string()),
        }
    }
}

impl IntoResponse for IngestOutcome {
    fn into_response(self) -> Response {
        let status = if self.accepted {
            StatusCode::OK
        } else {
            StatusCode::UNPROCESSABLE_ENTITY
        };
        (status, Json(self)).into_response()
    }
}
