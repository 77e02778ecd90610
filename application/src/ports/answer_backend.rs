//! Answer backend port
//!
//! Defines the interface for asking one hosted model a question.

use async_trait::async_trait;
use quorum_domain::BackendId;
use thiserror::Error;

/// Errors that can occur when calling a backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// No credential configured; the orchestrator skips such backends up front
    #[error("Backend not configured: {0}")]
    Unavailable(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Timed out: {0}")]
    Timeout(String),

    /// Invalid JSON, missing keys, empty choice list
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl BackendError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, BackendError::Timeout(_))
    }
}

/// One hosted model that can answer a question
///
/// Implementations (adapters) live in the infrastructure layer. Temperature
/// and token ceilings are fixed per implementation.
#[async_trait]
pub trait AnswerBackend: Send + Sync {
    /// Which backend this is; determines its priority position
    fn id(&self) -> BackendId;

    /// Model name sent on the wire
    fn model(&self) -> &str;

    /// Whether a credential is present
    fn is_configured(&self) -> bool;

    /// Send the question and return the answer text
    async fn answer(&self, question: &str) -> Result<String, BackendError>;
}
