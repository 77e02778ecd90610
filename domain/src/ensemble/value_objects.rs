//! Ensemble value objects - immutable per-request results.
//!
//! - [`Candidate`] - one backend's successful answer
//! - [`FileDigest`] - short summary of one tabular attachment

use crate::attachment::tabular::TabularKind;
use crate::core::backend::BackendId;
use serde::{Deserialize, Serialize};

/// A successful answer from one backend
///
/// Failed or unconfigured backends never produce a `Candidate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The backend that produced this answer
    pub backend: BackendId,
    /// Model name used by that backend
    pub model: String,
    /// The answer text
    #[serde(rename = "answer")]
    pub text: String,
}

impl Candidate {
    pub fn new(backend: BackendId, model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            text: text.into(),
        }
    }
}

/// Content of a digest: a record preview or an inline failure note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum DigestBody {
    Preview(String),
    ParseError(String),
}

/// Summary of one tabular attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDigest {
    pub kind: TabularKind,
    pub filename: String,
    pub body: DigestBody,
}

impl FileDigest {
    pub fn preview(kind: TabularKind, filename: impl Into<String>, records: impl Into<String>) -> Self {
        Self {
            kind,
            filename: filename.into(),
            body: DigestBody::Preview(records.into()),
        }
    }

    pub fn parse_error(kind: TabularKind, filename: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind,
            filename: filename.into(),
            body: DigestBody::ParseError(reason.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.body, DigestBody::ParseError(_))
    }
}

/// Renders as `<kind> <filename>: <preview-records-or-error-note>`
impl std::fmt::Display for FileDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.body {
            DigestBody::Preview(records) => write!(f, "{} {}: {}", self.kind, self.filename, records),
            DigestBody::ParseError(reason) => {
                write!(f, "{} {}: Could not parse ({})", self.kind, self.filename, reason)
            }
        }
    }
}
