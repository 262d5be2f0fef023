use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

use crate::sections::SegmentedResume;

/// A stored, accepted resume. `segments` and `metadata` are kept as JSON; the
/// sink never interprets either.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParsedResumeRow {
    pub id: Uuid,
    pub filename: String,
    pub mime_type: String,
    pub segments: Value,
    pub metadata: Value,
    pub used_fallback: bool,
    pub created_at: DateTime<Utc>,
}

/// Everything the sink needs to store an accepted resume.
#[derive(Debug, Clone)]
pub struct NewParsedResume {
    pub filename: String,
    pub mime_type: String,
    pub segments: SegmentedResume,
    pub metadata: Map<String, Value>,
    pub used_fallback: bool,
}
