//! Adjudicate use case
//!
//! One reviewer call that turns the candidates into the final answer.

use crate::config::AdjudicationPolicy;
use crate::ports::answer_backend::BackendError;
use crate::ports::review_gateway::ReviewGateway;
use quorum_domain::{AdjudicationPrompt, Candidate, FileDigest, Question, oversized_image_payload};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors that end a request at the adjudication stage
#[derive(Error, Debug)]
pub enum AdjudicationError {
    #[error("Reviewer not configured: {0}")]
    NotConfigured(String),

    #[error("Reviewer call failed: {0}")]
    Gateway(#[from] BackendError),

    #[error("Reviewer returned invalid JSON: {0}")]
    MalformedOutput(String),

    #[error("Embedded image of {size} bytes exceeds the {budget} byte ceiling")]
    ImageBudgetExceeded { size: usize, budget: usize },
}

impl AdjudicationError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, AdjudicationError::Gateway(e) if e.is_timeout())
    }
}

/// Use case for the final adjudication call
pub struct AdjudicateUseCase {
    gateway: Arc<dyn ReviewGateway>,
    policy: AdjudicationPolicy,
}

impl AdjudicateUseCase {
    pub fn new(gateway: Arc<dyn ReviewGateway>, policy: AdjudicationPolicy) -> Self {
        Self { gateway, policy }
    }

    pub fn reviewer_model(&self) -> &str {
        self.gateway.model()
    }

    /// Ask the reviewer for the final answer.
    ///
    /// Runs even when `candidates` is empty. The returned text is trimmed and
    /// otherwise passed through unless the policy enables a check.
    pub async fn execute(
        &self,
        question: &Question,
        candidates: &[Candidate],
        digests: &[FileDigest],
    ) -> Result<String, AdjudicationError> {
        if !self.gateway.is_configured() {
            return Err(AdjudicationError::NotConfigured(
                self.gateway.model().to_string(),
            ));
        }

        let prompt = AdjudicationPrompt::user_prompt(
            question.content(),
            candidates,
            digests,
            self.policy.image_budget_bytes,
        );
        debug!(
            model = self.gateway.model(),
            candidates = candidates.len(),
            digests = digests.len(),
            prompt_bytes = prompt.len(),
            "Sending adjudication prompt"
        );

        let content = self
            .gateway
            .review(AdjudicationPrompt::system(), &prompt)
            .await?;
        let answer = content.trim().to_string();

        self.check(&answer)?;
        Ok(answer)
    }

    fn check(&self, answer: &str) -> Result<(), AdjudicationError> {
        if self.policy.validate_json {
            serde_json::from_str::<serde_json::Value>(answer)
                .map_err(|e| AdjudicationError::MalformedOutput(e.to_string()))?;
        }

        if self.policy.enforce_image_budget {
            let budget = self.policy.image_budget_bytes;
            if let Some(size) = oversized_image_payload(answer, budget) {
                return Err(AdjudicationError::ImageBudgetExceeded { size, budget });
            }
        }

        Ok(())
    }
}
