//! Route handlers

use super::AppState;
use super::error::ApiError;
use crate::progress::LogProgress;
use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::header,
    response::{IntoResponse, Response},
};
use quorum_application::RunEnsembleInput;
use quorum_domain::{Attachment, AttachmentSet};
use serde_json::{Value, json};
use tracing::debug;

/// POST /api/
///
/// Every part with a filename is an attachment; the first one holds the
/// question.
pub async fn submit(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let attachments = read_attachments(multipart?).await?;
    let input = RunEnsembleInput::from_attachments(attachments)?;

    let output = state
        .ensemble
        .execute_with_progress(input, &LogProgress)
        .await?;

    Ok(answer_response(output.answer))
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "active_backends": state.ensemble.active_backends(),
    }))
}

async fn read_attachments(mut multipart: Multipart) -> Result<AttachmentSet, MultipartError> {
    let mut attachments = AttachmentSet::default();

    while let Some(field) = multipart.next_field().await? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            debug!(field = ?field.name(), "Ignoring multipart field without filename");
            continue;
        };
        let bytes = field.bytes().await?;
        debug!(file = %filename, bytes = bytes.len(), "Attachment received");
        attachments.push(Attachment::new(filename, bytes.to_vec()));
    }

    Ok(attachments)
}

/// JSON answers pass through untouched; anything else becomes a JSON string.
pub fn answer_response(answer: String) -> Response {
    let body = if serde_json::from_str::<Value>(&answer).is_ok() {
        answer
    } else {
        Value::String(answer).to_string()
    };

    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
