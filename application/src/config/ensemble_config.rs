//! Ensemble parameters - fan-out control.
//!
//! [`EnsembleConfig`] groups the static parameters that control the
//! fan-out in [`RunEnsembleUseCase`](crate::use_cases::run_ensemble::RunEnsembleUseCase).
//! These are application-layer concerns, not domain policy.

use super::adjudication_policy::AdjudicationPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fan-out control parameters.
///
/// Built once at start-up and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleConfig {
    /// Deadline for all backend calls of one request.
    ///
    /// A backend still pending when it expires is treated as failed and
    /// omitted from the candidates. `None` waits for every backend's own
    /// timeout.
    pub request_deadline: Option<Duration>,
    /// Checks applied to the reviewer's output.
    pub adjudication: AdjudicationPolicy,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            request_deadline: Some(Duration::from_secs(120)),
            adjudication: AdjudicationPolicy::default(),
        }
    }
}

impl EnsembleConfig {
    // ==================== Builder Methods ====================

    pub fn with_request_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.request_deadline = deadline;
        self
    }

    pub fn with_adjudication(mut self, policy: AdjudicationPolicy) -> Self {
        self.adjudication = policy;
        self
    }
}
