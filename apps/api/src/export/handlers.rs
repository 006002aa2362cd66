use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::render_document;
use crate::state::AppState;
use crate::tailoring::handlers::EmailQuery;

/// GET /api/v1/suggestions/:id/document?email=
pub async fn handle_download_document(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<EmailQuery>,
) -> Result<Response, AppError> {
    let record = state
        .relational
        .get_suggestion(id)
        .await?
        // Another submitter's record is indistinguishable from a missing one.
        .filter(|r| r.email == params.email.trim())
        .ok_or_else(|| AppError::NotFound(format!("Suggestion {id} not found")))?;

    // Layout and serialization are CPU-bound.
    let geometry = state.page_geometry.clone();
    let doc = tokio::task::spawn_blocking(move || render_document(&record, &geometry))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Export task failed: {e}")))??;

    info!(
        suggestion_id = %id,
        pages = doc.page_count,
        bytes = doc.bytes.len(),
        "Exported report"
    );

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        ascii_filename(&doc.filename)
    ))
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        doc.bytes,
    )
        .into_response())
}

/// Header-safe filename: non-ASCII and quoting characters become `_`.
fn ascii_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect()
}
