//! API error taxonomy and the JSON error envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::validation::FieldError;

/// Everything a handler can reject a request with. Store errors arrive
/// through the `Internal` variant and render as a generic 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("authentication required")]
    Unauthorized,
    #[error("invalid request payload")]
    BadRequest,
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error("resource not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Internal(err) => {
                log::error!("Request failed: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let message = match &self {
            ApiError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        };

        let mut envelope = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });
        if let ApiError::Validation(fields) = &self {
            envelope["error"]["fields"] = json!(fields);
        }

        (status, Json(envelope)).into_response()
    }
}
