//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod answer_backend;
pub mod data_summarizer;
pub mod progress;
pub mod review_gateway;
