//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`EnsembleConfig`] - fan-out control (per-request deadline)
//! - [`AdjudicationPolicy`] - optional checks on the reviewer's output

pub mod adjudication_policy;
pub mod ensemble_config;

pub use adjudication_policy::AdjudicationPolicy;
pub use ensemble_config::EnsembleConfig;
