use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::suggestion::SuggestionRecord;
use crate::storage::{NewResumeRow, NewSuggestionRow, RelationalStore, StoreResult};

const SUGGESTION_COLUMNS: &str = r#"
    s.id, s.email, s.job_title, s.suggestion_text, s.resume_id,
    COALESCE(r.full_name, 'Unknown') AS full_name, s.created_at
"#;

/// PostgreSQL-backed relational store (`resumes` + `suggestions` tables).
#[derive(Clone)]
pub struct PgRelationalStore {
    pool: PgPool,
}

impl PgRelationalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelationalStore for PgRelationalStore {
    async fn insert_resume(&self, row: NewResumeRow<'_>) -> StoreResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO resumes (email, full_name, resume_text) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(row.email)
        .bind(row.full_name)
        .bind(row.resume_text)
        .fetch_one(&self.pool)
        .await?;

        info!(resume_id = %id, "Inserted resume row");
        Ok(id)
    }

    async fn insert_suggestion(&self, row: NewSuggestionRow<'_>) -> StoreResult<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO suggestions (email, suggestion_text, job_title, resume_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(row.email)
        .bind(row.suggestion_text)
        .bind(row.job_title)
        .bind(row.resume_id)
        .fetch_one(&self.pool)
        .await?;

        info!(suggestion_id = %id, resume_id = %row.resume_id, "Inserted suggestion row");
        Ok(id)
    }

    async fn list_suggestions(&self, email: &str) -> StoreResult<Vec<SuggestionRecord>> {
        let records = sqlx::query_as::<_, SuggestionRecord>(&format!(
            r#"
            SELECT {SUGGESTION_COLUMNS}
            FROM suggestions s
            LEFT JOIN resumes r ON r.id = s.resume_id
            WHERE s.email = $1
            ORDER BY s.created_at DESC
            "#
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn get_suggestion(&self, id: Uuid) -> StoreResult<Option<SuggestionRecord>> {
        let record = sqlx::query_as::<_, SuggestionRecord>(&format!(
            r#"
            SELECT {SUGGESTION_COLUMNS}
            FROM suggestions s
            LEFT JOIN resumes r ON r.id = s.resume_id
            WHERE s.id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}
