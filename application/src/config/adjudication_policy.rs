//! Output checks for the adjudication call.

use quorum_domain::DEFAULT_IMAGE_BUDGET_BYTES;
use serde::{Deserialize, Serialize};

/// What to verify about the reviewer's answer before returning it.
///
/// Both checks are off by default: the reviewer's text is passed through
/// unchanged and the image ceiling is only stated in the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjudicationPolicy {
    /// Reject answers that are not valid JSON.
    pub validate_json: bool,
    /// Reject answers whose embedded image string exceeds the ceiling.
    pub enforce_image_budget: bool,
    /// Ceiling for one encoded image string, in bytes.
    pub image_budget_bytes: usize,
}

impl Default for AdjudicationPolicy {
    fn default() -> Self {
        Self {
            validate_json: false,
            enforce_image_budget: false,
            image_budget_bytes: DEFAULT_IMAGE_BUDGET_BYTES,
        }
    }
}

impl AdjudicationPolicy {
    pub fn with_json_validation(mut self, enabled: bool) -> Self {
        self.validate_json = enabled;
        self
    }

    pub fn with_image_budget(mut self, enforce: bool, budget_bytes: usize) -> Self {
        self.enforce_image_budget = enforce;
        self.image_budget_bytes = budget_bytes;
        self
    }
}
