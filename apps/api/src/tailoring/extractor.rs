//! Response Extractor: unwraps the structured answer from the service's chatty reply.
//!
//! The service wraps its JSON object in conversational text of unpredictable length.
//! Extraction is brace-bounded: everything from the first `{` to the last `}` is
//! parsed as one object. This is lenient on purpose; the reply format is neither
//! versioned nor self-describing.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::tailoring::models::{SuggestionResult, TailoringPayload};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("service envelope is not valid JSON: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("service envelope contains no text element")]
    EmptyEnvelope,

    #[error("no brace-delimited object found in response text")]
    NoObject,

    #[error("embedded object failed to parse: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("embedded object has none of the suggestion fields")]
    NoSuggestions,
}

/// Keys of a suggestion object; at least one must be present.
const SUGGESTION_KEYS: [&str; 5] = [
    "summary",
    "skills_to_add",
    "experience_to_add",
    "projects_to_add",
    "general_suggestions",
];

#[derive(Debug, Deserialize)]
struct EnvelopeItem {
    text: Option<String>,
}

/// Returns the raw text carried by the first element of the service's JSON envelope.
pub fn envelope_text(body: &str) -> Result<String, ExtractError> {
    let items: Vec<EnvelopeItem> = serde_json::from_str(body).map_err(ExtractError::Envelope)?;
    items
        .into_iter()
        .next()
        .and_then(|item| item.text)
        .ok_or(ExtractError::EmptyEnvelope)
}

/// Extracts the suggestion object from a raw reply.
///
/// Accepts both the full payload (`{"suggestion_text": {...}, ...}`) and a bare
/// suggestion object; the full payload is what the service sends today. An
/// object carrying none of the suggestion keys (an error body, `{}`) is rejected.
pub fn extract(raw_text: &str) -> Result<SuggestionResult, ExtractError> {
    let object: Value = extract_object(raw_text)?;
    let suggestions = object.get("suggestion_text").unwrap_or(&object);
    if !SUGGESTION_KEYS.iter().any(|key| suggestions.get(key).is_some()) {
        return Err(ExtractError::NoSuggestions);
    }
    SuggestionResult::deserialize(suggestions).map_err(ExtractError::Parse)
}

/// Extracts the full tailoring payload (resume text, name, job title, suggestions).
pub fn extract_payload(raw_text: &str) -> Result<TailoringPayload, ExtractError> {
    let suggestion_text = extract(raw_text)?;
    let payload: TailoringPayload = extract_object(raw_text)?;
    Ok(TailoringPayload {
        suggestion_text,
        ..payload
    })
}

/// Parses the first-`{`-to-last-`}` slice of `raw_text` as `T`.
pub fn extract_object<T: DeserializeOwned>(raw_text: &str) -> Result<T, ExtractError> {
    let candidate = brace_bounded(raw_text).ok_or(ExtractError::NoObject)?;
    serde_json::from_str(candidate).map_err(ExtractError::Parse)
}

/// Inclusive slice between the first `{` and the last `}`, if they are correctly ordered.
fn brace_bounded(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}
