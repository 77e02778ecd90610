//! Error responses of the HTTP boundary

use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use quorum_application::RunEnsembleError;
use quorum_domain::RequestValidationError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] RequestValidationError),

    /// Body is not multipart at all
    #[error("Invalid multipart body: {0}")]
    NotMultipart(#[from] MultipartRejection),

    /// Multipart stream broke off or exceeded the size limit
    #[error("Invalid multipart body: {0}")]
    InvalidMultipart(#[from] MultipartError),

    #[error(transparent)]
    Ensemble(#[from] RunEnsembleError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, json!({ "error": e.to_string() })),
            ApiError::NotMultipart(e) => (
                e.status(),
                json!({ "error": "Invalid multipart body", "details": e.body_text() }),
            ),
            ApiError::InvalidMultipart(e) => (
                e.status(),
                json!({ "error": "Invalid multipart body", "details": e.body_text() }),
            ),
            ApiError::Ensemble(e) => {
                error!(error = ?e, "Ensemble request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error", "details": e.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
