//! Application layer for answer-quorum
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AdjudicationPolicy, EnsembleConfig};
pub use ports::{
    answer_backend::{AnswerBackend, BackendError},
    data_summarizer::{DataSummarizer, NoSummaries},
    progress::{NoProgress, ProgressNotifier},
    review_gateway::ReviewGateway,
};
pub use use_cases::adjudicate::{AdjudicateUseCase, AdjudicationError};
pub use use_cases::run_ensemble::{
    EnsembleOutput, RunEnsembleError, RunEnsembleInput, RunEnsembleUseCase,
};
