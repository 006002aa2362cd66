//! In-memory stores for tests. Every write is appended to a shared journal so
//! tests can assert on cross-store ordering.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::models::document::ResumeRecord;
use crate::models::suggestion::SuggestionRecord;
use crate::storage::{
    DocumentStore, NewResumeRow, NewSuggestionRow, RelationalStore, StoreError, StoreResult,
};

pub type Journal = Arc<Mutex<Vec<String>>>;

#[derive(Default)]
pub struct MemoryDocumentStore {
    pub records: Mutex<Vec<(String, ResumeRecord)>>,
    pub fail: bool,
    pub journal: Journal,
}

impl MemoryDocumentStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_resume_text(&self, record: &ResumeRecord) -> StoreResult<String> {
        self.journal.lock().unwrap().push("document:resume".to_string());
        if self.fail {
            return Err(StoreError::ObjectStorage("bucket unavailable".to_string()));
        }
        let id = Uuid::new_v4().to_string();
        self.records
            .lock()
            .unwrap()
            .push((id.clone(), record.clone()));
        Ok(id)
    }
}

#[derive(Default)]
pub struct MemoryRelationalStore {
    pub resumes: Mutex<Vec<(Uuid, String, String, String)>>,
    pub suggestions: Mutex<Vec<SuggestionRecord>>,
    pub fail_resume_insert: bool,
    pub fail_suggestion_insert: bool,
    pub journal: Journal,
}

impl MemoryRelationalStore {
    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }

    pub fn resume_count(&self) -> usize {
        self.resumes.lock().unwrap().len()
    }

    pub fn suggestion_count(&self) -> usize {
        self.suggestions.lock().unwrap().len()
    }
}

#[async_trait]
impl RelationalStore for MemoryRelationalStore {
    async fn insert_resume(&self, row: NewResumeRow<'_>) -> StoreResult<Uuid> {
        self.journal.lock().unwrap().push("relational:resume".to_string());
        if self.fail_resume_insert {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let id = Uuid::new_v4();
        self.resumes.lock().unwrap().push((
            id,
            row.email.to_string(),
            row.full_name.to_string(),
            row.resume_text.to_string(),
        ));
        Ok(id)
    }

    async fn insert_suggestion(&self, row: NewSuggestionRow<'_>) -> StoreResult<Uuid> {
        self.journal
            .lock()
            .unwrap()
            .push("relational:suggestion".to_string());
        if self.fail_suggestion_insert {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let full_name = self
            .resumes
            .lock()
            .unwrap()
            .iter()
            .find(|(id, ..)| *id == row.resume_id)
            .map(|(_, _, name, _)| name.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let id = Uuid::new_v4();
        self.suggestions.lock().unwrap().push(SuggestionRecord {
            id,
            email: row.email.to_string(),
            job_title: row.job_title.to_string(),
            suggestion_text: row.suggestion_text.to_string(),
            resume_id: Some(row.resume_id),
            full_name,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn list_suggestions(&self, email: &str) -> StoreResult<Vec<SuggestionRecord>> {
        let mut records: Vec<SuggestionRecord> = self
            .suggestions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.email == email)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn get_suggestion(&self, id: Uuid) -> StoreResult<Option<SuggestionRecord>> {
        Ok(self
            .suggestions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }
}
