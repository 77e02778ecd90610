//! Core domain concepts shared across all subdomains.
//!
//! - [`backend::BackendId`] - the fixed set of answering backends, in priority order
//! - [`question::Question`] - the opaque question text of one request
//! - [`error::DomainError`] - domain-level errors

pub mod backend;
pub mod error;
pub mod question;
pub mod string;
