//! Suggestion service client: the single point of entry for calls to the external
//! tailoring service.
//!
//! The service is an opaque HTTP endpoint: it takes a multipart upload (`file`,
//! `jobDescription`) and replies with a JSON envelope whose first element's `text`
//! holds the answer. This module only transports; unwrapping the answer is the
//! extractor's job.
//!
//! No retries: a failed call is terminal for the submission.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::tailoring::models::UploadedFile;

const DEFAULT_CONTENT_TYPE: &str = "application/pdf";
/// Longest slice of an error body kept for logs.
const ERROR_BODY_PREVIEW: usize = 512;

#[derive(Debug, Error)]
pub enum SuggestionClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service error (status {status}): {message}")]
    Status { status: u16, message: String },
}

/// The port the orchestrator calls. Returns the raw response body.
#[async_trait]
pub trait SuggestionService: Send + Sync {
    async fn request_suggestions(
        &self,
        file: &UploadedFile,
        job_description: &str,
    ) -> Result<String, SuggestionClientError>;
}

/// reqwest-backed client for the external suggestion service.
#[derive(Clone)]
pub struct SuggestionClient {
    client: Client,
    endpoint: String,
}

impl SuggestionClient {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self, SuggestionClientError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn build_form(file: &UploadedFile, job_description: &str) -> Result<Form, SuggestionClientError> {
    let part = Part::bytes(file.bytes.to_vec())
        .file_name(file.file_name.clone())
        .mime_str(file.content_type.as_deref().unwrap_or(DEFAULT_CONTENT_TYPE))?;

    Ok(Form::new()
        .part("file", part)
        .text("jobDescription", job_description.to_string()))
}

#[async_trait]
impl SuggestionService for SuggestionClient {
    async fn request_suggestions(
        &self,
        file: &UploadedFile,
        job_description: &str,
    ) -> Result<String, SuggestionClientError> {
        let form = build_form(file, job_description)?;

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Suggestion service returned {}: {}", status, preview(&body));
            return Err(SuggestionClientError::Status {
                status: status.as_u16(),
                message: preview(&body).to_string(),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Suggestion service call succeeded");
        Ok(body)
    }
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(ERROR_BODY_PREVIEW) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_preview_truncates_long_bodies() {
        let body = "x".repeat(ERROR_BODY_PREVIEW + 10);
        assert_eq!(preview(&body).len(), ERROR_BODY_PREVIEW);
    }

    #[test]
    fn test_preview_keeps_short_bodies() {
        assert_eq!(preview("bad gateway"), "bad gateway");
    }

    #[test]
    fn test_form_rejects_invalid_content_type() {
        let file = UploadedFile {
            file_name: "resume.pdf".to_string(),
            content_type: Some("not a mime".to_string()),
            bytes: Bytes::from_static(b"%PDF-1.4"),
        };
        assert!(build_form(&file, "Backend role").is_err());
    }

    #[test]
    fn test_form_defaults_to_pdf_content_type() {
        let file = UploadedFile {
            file_name: "resume.pdf".to_string(),
            content_type: None,
            bytes: Bytes::from_static(b"%PDF-1.4"),
        };
        assert!(build_form(&file, "").is_ok());
    }

    #[test]
    fn test_client_keeps_endpoint() {
        let client = SuggestionClient::new(
            "http://localhost:5678/webhook/resume-tailor".to_string(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5678/webhook/resume-tailor");
    }
}
