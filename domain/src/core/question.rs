//! Question value object

use super::error::RequestValidationError;
use crate::attachment::entities::AttachmentSet;
use serde::{Deserialize, Serialize};

/// The question of one request (Value Object)
///
/// Opaque text taken from the first uploaded file. No parsing is performed;
/// an empty question is passed through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Create a new question
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// Decode raw bytes as UTF-8, replacing invalid sequences
    pub fn from_bytes_lossy(bytes: &[u8]) -> Self {
        Self::new(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Take the question from the first attachment in upload order
    pub fn from_first_attachment(
        attachments: &AttachmentSet,
    ) -> Result<Self, RequestValidationError> {
        attachments
            .first()
            .map(|a| Self::from_bytes_lossy(a.bytes()))
            .ok_or(RequestValidationError::NoFiles)
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Question {
    fn from(s: &str) -> Self {
        Question::new(s)
    }
}

impl From<String> for Question {
    fn from(s: String) -> Self {
        Question::new(s)
    }
}
