use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use tracing::info;
use uuid::Uuid;

use crate::models::document::ResumeRecord;
use crate::storage::{DocumentStore, StoreError, StoreResult};

/// Document store backed by an S3-compatible bucket (MinIO locally, AWS in production).
///
/// Each record is one JSON object at `resumes/<id>.json`.
#[derive(Clone)]
pub struct S3DocumentStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3DocumentStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

pub fn object_key(id: &str) -> String {
    format!("resumes/{id}.json")
}

#[async_trait]
impl DocumentStore for S3DocumentStore {
    async fn insert_resume_text(&self, record: &ResumeRecord) -> StoreResult<String> {
        let id = Uuid::new_v4().to_string();
        let key = object_key(&id);
        let body = serde_json::to_vec(record)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .content_type("application/json")
            .send()
            .await
            .map_err(|e| StoreError::ObjectStorage(format!("S3 upload failed: {e}")))?;

        info!("Stored resume text at s3://{}/{}", self.bucket, key);
        Ok(id)
    }
}
