//! Ensemble configuration from TOML (`[ensemble]` section)

use quorum_application::{AdjudicationPolicy, EnsembleConfig};
use quorum_domain::DEFAULT_IMAGE_BUDGET_BYTES;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw ensemble configuration
///
/// # Example
///
/// ```toml
/// [ensemble]
/// request_deadline_secs = 90    # pending backends are dropped after this; 0 disables
/// preview_rows = 5              # rows shown per tabular attachment
/// validate_json = false         # reject non-JSON reviewer output
/// enforce_image_budget = false  # reject oversized inline images
/// image_budget_bytes = 100000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileEnsembleConfig {
    /// Deadline for all backend calls of one request; `0` disables it
    pub request_deadline_secs: u64,
    /// Records shown per tabular attachment
    pub preview_rows: usize,
    pub validate_json: bool,
    pub enforce_image_budget: bool,
    pub image_budget_bytes: usize,
}

impl Default for FileEnsembleConfig {
    fn default() -> Self {
        Self {
            request_deadline_secs: 120,
            preview_rows: 5,
            validate_json: false,
            enforce_image_budget: false,
            image_budget_bytes: DEFAULT_IMAGE_BUDGET_BYTES,
        }
    }
}

impl FileEnsembleConfig {
    /// Convert to the application-layer configuration
    pub fn to_ensemble_config(&self) -> EnsembleConfig {
        let deadline = (self.request_deadline_secs > 0)
            .then(|| Duration::from_secs(self.request_deadline_secs));
        EnsembleConfig::default()
            .with_request_deadline(deadline)
            .with_adjudication(
                AdjudicationPolicy::default()
                    .with_json_validation(self.validate_json)
                    .with_image_budget(self.enforce_image_budget, self.image_budget_bytes),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion() {
        let file = FileEnsembleConfig {
            request_deadline_secs: 30,
            validate_json: true,
            ..Default::default()
        };
        let config = file.to_ensemble_config();
        assert_eq!(config.request_deadline, Some(Duration::from_secs(30)));
        assert!(config.adjudication.validate_json);
        assert!(!config.adjudication.enforce_image_budget);
        assert_eq!(config.adjudication.image_budget_bytes, DEFAULT_IMAGE_BUDGET_BYTES);
    }

    #[test]
    fn test_zero_deadline_disables_it() {
        let file: FileEnsembleConfig = toml::from_str("request_deadline_secs = 0").unwrap();
        assert!(file.to_ensemble_config().request_deadline.is_none());
    }
}
