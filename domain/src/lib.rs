//! Domain layer for answer-quorum
//!
//! This crate contains the core value objects of an answer-ensemble request.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Ensemble
//!
//! One question is fanned out to several independent backends. Every backend
//! that answers produces a [`Candidate`]; backends that fail are omitted.
//!
//! ## Adjudication
//!
//! A reviewer model receives the question, all candidates and the
//! [`FileDigest`]s of tabular attachments, and returns the single final
//! answer in the format the question asks for.

pub mod attachment;
pub mod core;
pub mod ensemble;
pub mod prompt;

// Re-export commonly used types
pub use attachment::{
    entities::{Attachment, AttachmentSet},
    tabular::TabularKind,
};
pub use core::{
    backend::BackendId,
    error::{DomainError, RequestValidationError},
    question::Question,
    string::{excerpt, truncate},
};
pub use ensemble::{
    image_budget::{DEFAULT_IMAGE_BUDGET_BYTES, oversized_image_payload},
    stage::RequestStage,
    value_objects::{Candidate, DigestBody, FileDigest},
};
pub use prompt::AdjudicationPrompt;
