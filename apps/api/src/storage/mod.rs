//! Storage ports and adapters.
//!
//! Two independent stores hold a submission's data:
//! - the document store keeps the raw resume text (`S3DocumentStore`)
//! - the relational store keeps linked resume/suggestion rows (`PgRelationalStore`)
//!
//! They are never written in one transaction. `persister::DualStorePersister`
//! sequences the writes and reports partial failures instead of undoing them.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::document::ResumeRecord;
use crate::models::suggestion::SuggestionRecord;

pub mod document_store;
#[cfg(test)]
pub mod memory;
pub mod persister;
pub mod relational_store;

pub use document_store::S3DocumentStore;
pub use persister::DualStorePersister;
pub use relational_store::PgRelationalStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("object storage error: {0}")]
    ObjectStorage(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A resume row for the relational store.
#[derive(Debug, Clone, Copy)]
pub struct NewResumeRow<'a> {
    pub email: &'a str,
    pub full_name: &'a str,
    pub resume_text: &'a str,
}

/// A suggestion row linked to an existing resume row.
#[derive(Debug, Clone, Copy)]
pub struct NewSuggestionRow<'a> {
    pub email: &'a str,
    pub suggestion_text: &'a str,
    pub job_title: &'a str,
    pub resume_id: Uuid,
}

/// Persistence for raw resume text.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Stores the record and returns its generated identifier.
    async fn insert_resume_text(&self, record: &ResumeRecord) -> StoreResult<String>;
}

/// Persistence for resume and suggestion rows.
#[async_trait]
pub trait RelationalStore: Send + Sync {
    async fn insert_resume(&self, row: NewResumeRow<'_>) -> StoreResult<Uuid>;

    async fn insert_suggestion(&self, row: NewSuggestionRow<'_>) -> StoreResult<Uuid>;

    /// All suggestions for a submitter, newest first.
    async fn list_suggestions(&self, email: &str) -> StoreResult<Vec<SuggestionRecord>>;

    async fn get_suggestion(&self, id: Uuid) -> StoreResult<Option<SuggestionRecord>>;
}
