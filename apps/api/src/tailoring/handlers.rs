use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::export::sections::{parse_transcript, ParsedSuggestionView};
use crate::models::suggestion::SuggestionRecord;
use crate::state::AppState;
use crate::storage::persister::{PersistError, StoreKind};
use crate::tailoring::formatter::SectionHeader;
use crate::tailoring::models::{Submission, SuggestionResult, UploadedFile};

pub const SUBMITTER_HEADER: &str = "x-user-email";

/// Shown for any store failure; details stay in the logs.
const SAVE_FAILED_MESSAGE: &str = "Something went wrong while saving your results.";

const DEFAULT_FILE_NAME: &str = "resume.pdf";

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StoreReport {
    Saved { id: String },
    Failed { failure: StoreKind, message: &'static str },
}

impl StoreReport {
    fn from_result<T: ToString>(result: Result<&T, &PersistError>) -> Self {
        match result {
            Ok(id) => StoreReport::Saved { id: id.to_string() },
            Err(e) => StoreReport::Failed {
                failure: e.store(),
                message: SAVE_FAILED_MESSAGE,
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PersistenceReport {
    pub document_store: StoreReport,
    pub relational_store: StoreReport,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub suggestions: SuggestionResult,
    pub resume_name: String,
    pub job_title: String,
    pub created_at: DateTime<Utc>,
    pub persistence: PersistenceReport,
    /// How long the client should keep its progress indicator up before showing results.
    pub display_delay_ms: u64,
}

/// POST /api/v1/suggestions
pub async fn handle_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<SubmitResponse>, AppError> {
    let submitter = submitter_from_headers(&headers)?;
    let submission = read_submission(multipart, submitter).await?;

    let outcome = state.orchestrator.submit(submission).await?;

    let persistence = PersistenceReport {
        document_store: StoreReport::from_result(outcome.document_store.as_ref()),
        relational_store: StoreReport::from_result(
            outcome
                .relational_store
                .as_ref()
                .map(|saved| &saved.suggestion_id),
        ),
    };

    Ok(Json(SubmitResponse {
        suggestions: outcome.suggestions,
        resume_name: outcome.resume_name,
        job_title: outcome.job_title,
        created_at: outcome.created_at,
        persistence,
        display_delay_ms: state.config.display_delay_ms,
    }))
}

fn submitter_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    headers
        .get(SUBMITTER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(AppError::Unauthorized)
}

async fn read_submission(mut multipart: Multipart, submitter: String) -> Result<Submission, AppError> {
    let mut file: Option<UploadedFile> = None;
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error("Invalid multipart body", e))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                if file.is_some() {
                    return Err(AppError::Validation(
                        "Upload exactly one resume file.".to_string(),
                    ));
                }
                let file_name = field.file_name().unwrap_or(DEFAULT_FILE_NAME).to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error("Could not read resume file", e))?;
                file = Some(UploadedFile {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            Some("jobDescription") => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| multipart_error("Could not read job description", e))?;
            }
            other => {
                warn!(field = ?other, "Ignoring unexpected multipart field");
            }
        }
    }

    Ok(Submission {
        file,
        job_description,
        submitter,
    })
}

/// Oversized bodies surface here once `DefaultBodyLimit` cuts the stream.
fn multipart_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("{context}: {err}"))
    }
}

#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

/// A saved suggestion together with its section view.
#[derive(Debug, Serialize)]
pub struct SavedSuggestionView {
    #[serde(flatten)]
    pub record: SuggestionRecord,
    /// Body of the Summary section, for list previews.
    pub summary: Option<String>,
    /// Section title → body, in transcript order.
    pub sections: ParsedSuggestionView,
}

/// GET /api/v1/suggestions?email=
pub async fn handle_list_suggestions(
    State(state): State<AppState>,
    Query(params): Query<EmailQuery>,
) -> Result<Json<Vec<SavedSuggestionView>>, AppError> {
    let email = params.email.trim();
    if email.is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }

    let records = state.relational.list_suggestions(email).await?;
    let views = records
        .into_iter()
        .map(|record| {
            let sections = parse_transcript(&record.suggestion_text);
            SavedSuggestionView {
                summary: sections.get(SectionHeader::Summary).map(str::to_string),
                sections,
                record,
            }
        })
        .collect();
    Ok(Json(views))
}
