use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored suggestion joined with its companion resume row.
///
/// `full_name` comes from the linked `resumes` row; `Unknown` if it is gone.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SuggestionRecord {
    pub id: Uuid,
    pub email: String,
    pub job_title: String,
    pub suggestion_text: String,
    pub resume_id: Option<Uuid>,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}
