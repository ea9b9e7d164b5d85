use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::store::StorageError;

/// Handler-level error taxonomy. Every variant maps to one HTTP response
/// with a JSON `{"error": ...}` body; storage and internal details are
/// logged and never leaked to the client. Nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or malformed.
    #[error("{0}")]
    Validation(String),
    /// No record with the given id.
    #[error("{0}")]
    NotFound(String),
    /// The mutation would break a collection invariant (last-admin rule).
    #[error("{0}")]
    Invariant(String),
    /// Bad credentials or an unusable token.
    #[error("Invalid credentials")]
    Auth,
    /// The persistence backend failed.
    #[error("storage failure")]
    Storage(#[from] StorageError),
    /// Unexpected server-side fault (e.g. token encoding).
    #[error("internal error")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Invariant(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Auth => StatusCode::UNAUTHORIZED,
            Self::Storage(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Storage(e) => {
                tracing::error!("storage failure: {e}");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error",
                }))
            }
            Self::Internal(detail) => {
                tracing::error!("internal error: {detail}");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "Internal server error",
                }))
            }
            other => HttpResponse::build(self.status_code()).json(serde_json::json!({
                "error": other.to_string(),
            })),
        }
    }
}
