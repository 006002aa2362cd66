//! Submission Orchestrator: drives one submission end to end.
//!
//! Flow: validate → suggestion service → envelope → extract → format →
//!       document store → relational store → outcome.
//!
//! Every step is awaited in order; nothing runs concurrently within a submission.
//! Failures before persistence abort the run with a `SubmitError`. Store failures
//! do not: the computed suggestions are always handed back, with a per-store report.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{error, info};

use crate::models::document::DocumentType;
use crate::storage::persister::{
    DualStorePersister, PersistError, SavedSuggestion, StoreKind, SuggestionSubmission,
};
use crate::suggestion_client::{SuggestionClientError, SuggestionService};
use crate::tailoring::audit::{PartialWrite, PersistenceAudit};
use crate::tailoring::extractor::{envelope_text, extract_payload, ExtractError};
use crate::tailoring::formatter::format_transcript;
use crate::tailoring::models::{Submission, SuggestionResult, UploadedFile};

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("suggestion service unavailable: {0}")]
    ServiceUnavailable(#[source] SuggestionClientError),

    #[error("malformed service response: {0}")]
    MalformedResponse(#[source] ExtractError),
}

/// Result of a submission that reached the persistence stage.
#[derive(Debug)]
pub struct SubmissionOutcome {
    pub suggestions: SuggestionResult,
    pub resume_name: String,
    pub job_title: String,
    pub created_at: DateTime<Utc>,
    pub document_store: Result<String, PersistError>,
    pub relational_store: Result<SavedSuggestion, PersistError>,
}

impl SubmissionOutcome {
    pub fn fully_persisted(&self) -> bool {
        self.document_store.is_ok() && self.relational_store.is_ok()
    }

    pub fn failed_stores(&self) -> Vec<StoreKind> {
        let mut failed = Vec::new();
        if let Err(e) = &self.document_store {
            failed.push(e.store());
        }
        if let Err(e) = &self.relational_store {
            failed.push(e.store());
        }
        failed
    }
}

pub struct SubmissionOrchestrator {
    service: Arc<dyn SuggestionService>,
    persister: DualStorePersister,
    audit: Arc<dyn PersistenceAudit>,
    max_job_description_chars: usize,
}

impl SubmissionOrchestrator {
    pub fn new(
        service: Arc<dyn SuggestionService>,
        persister: DualStorePersister,
        audit: Arc<dyn PersistenceAudit>,
        max_job_description_chars: usize,
    ) -> Self {
        Self {
            service,
            persister,
            audit,
            max_job_description_chars,
        }
    }

    pub async fn submit(&self, submission: Submission) -> Result<SubmissionOutcome, SubmitError> {
        let file = self.validate(&submission)?;

        // Step 1: external service
        info!(
            submitter = %submission.submitter,
            file = %file.file_name,
            bytes = file.bytes.len(),
            "Requesting tailoring suggestions"
        );
        let body = self
            .service
            .request_suggestions(file, &submission.job_description)
            .await
            .map_err(|e| {
                error!("Suggestion service call failed: {e}");
                SubmitError::ServiceUnavailable(e)
            })?;

        // Step 2: envelope + extraction
        let payload = envelope_text(&body)
            .and_then(|raw| extract_payload(&raw))
            .map_err(|e| {
                error!("Could not extract suggestions from service reply: {e}");
                SubmitError::MalformedResponse(e)
            })?;

        // Step 3: format
        let created_at = Utc::now();
        let transcript = format_transcript(&payload.suggestion_text);

        // Step 4: persist, document store first. The relational write runs regardless.
        let document_store = self
            .persister
            .save_resume_text(
                &payload.resume_name,
                created_at,
                DocumentType::Pdf,
                &payload.resume_text,
            )
            .await;

        let relational_store = self
            .persister
            .save_suggestion(SuggestionSubmission {
                email: &submission.submitter,
                full_name: &payload.resume_name,
                resume_text: &payload.resume_text,
                transcript: &transcript,
                job_title: &payload.job_title,
            })
            .await;

        let outcome = SubmissionOutcome {
            suggestions: payload.suggestion_text,
            resume_name: payload.resume_name,
            job_title: payload.job_title,
            created_at,
            document_store,
            relational_store,
        };

        if outcome.fully_persisted() {
            info!(submitter = %submission.submitter, "Submission processed and saved");
        } else {
            self.report_partial_write(&submission.submitter, &outcome)
                .await;
        }

        // Step 5: hand back the suggestions, whatever happened to the stores.
        Ok(outcome)
    }

    fn validate<'a>(&self, submission: &'a Submission) -> Result<&'a UploadedFile, SubmitError> {
        let file = submission
            .file
            .as_ref()
            .ok_or_else(|| SubmitError::InvalidInput("Please upload a resume file.".to_string()))?;

        if file.bytes.is_empty() {
            return Err(SubmitError::InvalidInput(
                "The uploaded resume file is empty.".to_string(),
            ));
        }

        let chars = submission.job_description.chars().count();
        if chars > self.max_job_description_chars {
            return Err(SubmitError::InvalidInput(format!(
                "Job description is {chars} characters; the limit is {}.",
                self.max_job_description_chars
            )));
        }

        Ok(file)
    }

    async fn report_partial_write(&self, submitter: &str, outcome: &SubmissionOutcome) {
        let resume_row_id = match &outcome.relational_store {
            Ok(saved) => Some(saved.resume_id),
            Err(e) => e.orphaned_resume_id(),
        };
        let document_id = outcome.document_store.as_ref().ok().cloned();

        // Nothing landed anywhere: not a partial write.
        if document_id.is_none() && resume_row_id.is_none() {
            error!(submitter = %submitter, "Submission was not persisted to any store");
            return;
        }

        self.audit
            .record_partial_write(&PartialWrite {
                submitter: submitter.to_string(),
                job_title: outcome.job_title.clone(),
                document_id,
                resume_row_id,
                suggestion_row_id: outcome
                    .relational_store
                    .as_ref()
                    .ok()
                    .map(|s| s.suggestion_id),
                failed_stores: outcome.failed_stores(),
            })
            .await;
    }
}
