//! Partial-persistence audit hook.
//!
//! The two stores are not transactionally linked. When one write lands and the
//! other does not, the orchestrator reports it here. The default sink only logs;
//! a reconciler can be plugged in behind the same trait.

use async_trait::async_trait;
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::storage::persister::StoreKind;

/// One submission whose data reached only part of the stores.
#[derive(Debug, Clone, Serialize)]
pub struct PartialWrite {
    pub submitter: String,
    pub job_title: String,
    pub document_id: Option<String>,
    pub resume_row_id: Option<Uuid>,
    pub suggestion_row_id: Option<Uuid>,
    pub failed_stores: Vec<StoreKind>,
}

#[async_trait]
pub trait PersistenceAudit: Send + Sync {
    async fn record_partial_write(&self, write: &PartialWrite);
}

/// Logs partial writes as structured warnings.
pub struct TracingAudit;

#[async_trait]
impl PersistenceAudit for TracingAudit {
    async fn record_partial_write(&self, write: &PartialWrite) {
        warn!(
            submitter = %write.submitter,
            job_title = %write.job_title,
            document_id = ?write.document_id,
            resume_row_id = ?write.resume_row_id,
            suggestion_row_id = ?write.suggestion_row_id,
            failed_stores = ?write.failed_stores,
            "Submission persisted to only part of the stores"
        );
    }
}
