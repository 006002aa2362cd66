use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize};

/// Structured tailoring suggestions, as produced by the external service.
///
/// Fields the service omits (or sends as `null`) come through empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills_to_add: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience_to_add: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub projects_to_add: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub general_suggestions: Vec<String>,
}

/// The whole object the service embeds in its reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TailoringPayload {
    /// Plain text of the uploaded resume, as read by the service.
    #[serde(default, deserialize_with = "null_as_default")]
    pub resume_text: String,
    /// Display name found on the resume.
    #[serde(default, deserialize_with = "null_as_default")]
    pub resume_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestion_text: SuggestionResult,
}

/// A resume upload as received from the caller.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// One user action: a resume, a job description and who sent them.
/// Lives only for the duration of a single pipeline run.
#[derive(Debug, Clone)]
pub struct Submission {
    pub file: Option<UploadedFile>,
    pub job_description: String,
    pub submitter: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
