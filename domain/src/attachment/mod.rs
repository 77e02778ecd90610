//! Uploaded files of a request.
//!
//! - [`entities::AttachmentSet`] - uploads in upload order; the first is the question source
//! - [`tabular::TabularKind`] - extensions recognized as delimited tabular data

pub mod entities;
pub mod tabular;
