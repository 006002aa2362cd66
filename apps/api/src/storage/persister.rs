//! Dual-Store Persister: writes one submission into both stores.
//!
//! The two operations are independent. Neither rolls back the other, and a
//! failed suggestion insert leaves its resume row behind; the orphan's id is
//! carried in the error so callers can report it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::models::document::{DocumentType, ResumeRecord};
use crate::storage::{DocumentStore, NewResumeRow, NewSuggestionRow, RelationalStore, StoreError};

/// Which of the two stores a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StoreKind {
    #[serde(rename = "DocumentStoreFailure")]
    Document,
    #[serde(rename = "RelationalStoreFailure")]
    Relational,
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("document store write failed: {0}")]
    DocumentStore(#[source] StoreError),

    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("resume row insert failed: {0}")]
    ResumeRow(#[source] StoreError),

    #[error("suggestion row insert failed, resume row {orphaned_resume_id} left in place: {source}")]
    SuggestionRow {
        orphaned_resume_id: Uuid,
        #[source]
        source: StoreError,
    },
}

impl PersistError {
    pub fn store(&self) -> StoreKind {
        match self {
            PersistError::DocumentStore(_) => StoreKind::Document,
            PersistError::MissingFields(_)
            | PersistError::ResumeRow(_)
            | PersistError::SuggestionRow { .. } => StoreKind::Relational,
        }
    }

    /// Resume row written before the failure, if any.
    pub fn orphaned_resume_id(&self) -> Option<Uuid> {
        match self {
            PersistError::SuggestionRow {
                orphaned_resume_id, ..
            } => Some(*orphaned_resume_id),
            _ => None,
        }
    }
}

/// Inputs of the relational write. All five must be non-blank.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionSubmission<'a> {
    pub email: &'a str,
    pub full_name: &'a str,
    pub resume_text: &'a str,
    pub transcript: &'a str,
    pub job_title: &'a str,
}

impl SuggestionSubmission<'_> {
    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("email", self.email),
            ("full_name", self.full_name),
            ("resume_text", self.resume_text),
            ("suggestion_text", self.transcript),
            ("job_title", self.job_title),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SavedSuggestion {
    pub resume_id: Uuid,
    pub suggestion_id: Uuid,
}

/// Holds the injected handles of both stores.
#[derive(Clone)]
pub struct DualStorePersister {
    documents: Arc<dyn DocumentStore>,
    relational: Arc<dyn RelationalStore>,
}

impl DualStorePersister {
    pub fn new(documents: Arc<dyn DocumentStore>, relational: Arc<dyn RelationalStore>) -> Self {
        Self {
            documents,
            relational,
        }
    }

    /// Writes the raw resume text to the document store. Accepts any text.
    pub async fn save_resume_text(
        &self,
        title: &str,
        created_at: DateTime<Utc>,
        document_type: DocumentType,
        raw_text: &str,
    ) -> Result<String, PersistError> {
        let record = ResumeRecord {
            title: title.to_string(),
            created_at,
            document_type,
            text: raw_text.to_string(),
        };

        let id = self
            .documents
            .insert_resume_text(&record)
            .await
            .map_err(|e| {
                error!("Document store write failed: {e}");
                PersistError::DocumentStore(e)
            })?;

        info!(record_id = %id, "Saved resume text");
        Ok(id)
    }

    /// Inserts the resume row, then the suggestion row linked to it.
    pub async fn save_suggestion(
        &self,
        submission: SuggestionSubmission<'_>,
    ) -> Result<SavedSuggestion, PersistError> {
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            error!(?missing, "Refusing relational write with blank fields");
            return Err(PersistError::MissingFields(missing));
        }

        let resume_id = self
            .relational
            .insert_resume(NewResumeRow {
                email: submission.email,
                full_name: submission.full_name,
                resume_text: submission.resume_text,
            })
            .await
            .map_err(|e| {
                error!("Resume row insert failed: {e}");
                PersistError::ResumeRow(e)
            })?;

        let suggestion_id = self
            .relational
            .insert_suggestion(NewSuggestionRow {
                email: submission.email,
                suggestion_text: submission.transcript,
                job_title: submission.job_title,
                resume_id,
            })
            .await
            .map_err(|e| {
                error!(%resume_id, "Suggestion row insert failed; resume row is orphaned: {e}");
                PersistError::SuggestionRow {
                    orphaned_resume_id: resume_id,
                    source: e,
                }
            })?;

        Ok(SavedSuggestion {
            resume_id,
            suggestion_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::{MemoryDocumentStore, MemoryRelationalStore};

    fn submission() -> SuggestionSubmission<'static> {
        SuggestionSubmission {
            email: "jane@example.com",
            full_name: "Jane Doe",
            resume_text: "Ten years of backend work.",
            transcript: "Summary:\nSolid.",
            job_title: "Backend Engineer",
        }
    }

    #[tokio::test]
    async fn test_save_resume_text_returns_generated_id() {
        let documents = Arc::new(MemoryDocumentStore::default());
        let persister =
            DualStorePersister::new(documents.clone(), Arc::new(MemoryRelationalStore::default()));

        let id = persister
            .save_resume_text("Jane Doe", Utc::now(), DocumentType::Pdf, "")
            .await
            .unwrap();

        assert!(!id.is_empty());
        let records = documents.records.lock().unwrap();
        assert_eq!(records[0].0, id);
        assert_eq!(records[0].1.text, "", "document store accepts any text");
    }

    #[tokio::test]
    async fn test_document_store_failure_is_classified() {
        let persister = DualStorePersister::new(
            Arc::new(MemoryDocumentStore::failing()),
            Arc::new(MemoryRelationalStore::default()),
        );
        let err = persister
            .save_resume_text("Jane Doe", Utc::now(), DocumentType::Pdf, "text")
            .await
            .unwrap_err();
        assert_eq!(err.store(), StoreKind::Document);
    }

    #[tokio::test]
    async fn test_save_suggestion_links_rows() {
        let relational = Arc::new(MemoryRelationalStore::default());
        let persister =
            DualStorePersister::new(Arc::new(MemoryDocumentStore::default()), relational.clone());

        let saved = persister.save_suggestion(submission()).await.unwrap();

        let suggestions = relational.suggestions.lock().unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].resume_id, Some(saved.resume_id));
        assert_eq!(suggestions[0].full_name, "Jane Doe");
        assert_eq!(suggestions[0].job_title, "Backend Engineer");
    }

    #[tokio::test]
    async fn test_blank_fields_are_refused_before_any_write() {
        let relational = Arc::new(MemoryRelationalStore::default());
        let persister =
            DualStorePersister::new(Arc::new(MemoryDocumentStore::default()), relational.clone());

        let err = persister
            .save_suggestion(SuggestionSubmission {
                full_name: "  ",
                job_title: "",
                ..submission()
            })
            .await
            .unwrap_err();

        match err {
            PersistError::MissingFields(fields) => {
                assert_eq!(fields, vec!["full_name", "job_title"]);
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
        assert_eq!(relational.resume_count(), 0);
        assert_eq!(relational.suggestion_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_suggestion_insert_leaves_orphaned_resume_row() {
        let relational = Arc::new(MemoryRelationalStore {
            fail_suggestion_insert: true,
            ..MemoryRelationalStore::default()
        });
        let persister =
            DualStorePersister::new(Arc::new(MemoryDocumentStore::default()), relational.clone());

        let err = persister.save_suggestion(submission()).await.unwrap_err();

        assert_eq!(err.store(), StoreKind::Relational);
        let orphan = err.orphaned_resume_id().expect("orphan id reported");
        assert_eq!(relational.resume_count(), 1, "resume row is not retracted");
        assert_eq!(relational.resumes.lock().unwrap()[0].0, orphan);
        assert_eq!(relational.suggestion_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_resume_insert_skips_suggestion_insert() {
        let relational = Arc::new(MemoryRelationalStore {
            fail_resume_insert: true,
            ..MemoryRelationalStore::default()
        });
        let persister =
            DualStorePersister::new(Arc::new(MemoryDocumentStore::default()), relational.clone());

        let err = persister.save_suggestion(submission()).await.unwrap_err();

        assert!(matches!(err, PersistError::ResumeRow(_)));
        assert!(err.orphaned_resume_id().is_none());
        assert_eq!(*relational.journal.lock().unwrap(), vec!["relational:resume"]);
    }
}
