//! Infrastructure layer for answer-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: hosted model clients, the tabular
//! summarizer, and configuration file loading.

pub mod config;
pub mod providers;
pub mod summarizer;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileConfig, FileEnsembleConfig, FileProvidersConfig,
    FileServerConfig, ProviderCredentials, Severity,
};
pub use providers::{BackendRegistry, RegistryError};
pub use summarizer::{CsvSummarizer, SummarizerParseError};
