use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format tag of a stored resume. Uploads are PDFs today.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    #[default]
    Pdf,
}

/// Raw resume text as kept in the document store. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecord {
    pub title: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    pub document_type: DocumentType,
    pub text: String,
}
