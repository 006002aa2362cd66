use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::pdf::PdfError;
use crate::storage::StoreError;
use crate::tailoring::orchestrator::SubmitError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Suggestion service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Malformed suggestion response: {0}")]
    MalformedResponse(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Export error: {0}")]
    Export(#[from] PdfError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::InvalidInput(msg) => AppError::Validation(msg),
            SubmitError::ServiceUnavailable(e) => AppError::ServiceUnavailable(e.to_string()),
            SubmitError::MalformedResponse(e) => AppError::MalformedResponse(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Suggestion service error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "SERVICE_UNAVAILABLE",
                    "The suggestion service could not be reached. Please try again.".to_string(),
                )
            }
            AppError::MalformedResponse(msg) => {
                tracing::error!("Malformed suggestion response: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_RESPONSE",
                    "The suggestion service returned an unreadable response.".to_string(),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "The document could not be generated".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion_client::SuggestionClientError;
    use crate::tailoring::extractor::ExtractError;

    #[test]
    fn test_submit_errors_map_to_statuses() {
        let invalid: AppError = SubmitError::InvalidInput("too long".to_string()).into();
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let unavailable: AppError = SubmitError::ServiceUnavailable(SuggestionClientError::Status {
            status: 503,
            message: "down".to_string(),
        })
        .into();
        assert_eq!(unavailable.into_response().status(), StatusCode::BAD_GATEWAY);

        let malformed: AppError = SubmitError::MalformedResponse(ExtractError::NoObject).into();
        assert!(matches!(malformed, AppError::MalformedResponse(_)));
        assert_eq!(malformed.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_not_found_and_unauthorized() {
        assert_eq!(
            AppError::NotFound("x".to_string()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Unauthorized.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
