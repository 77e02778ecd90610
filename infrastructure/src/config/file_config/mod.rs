//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types on demand.

mod ensemble;
mod providers;
mod server;

pub use ensemble::FileEnsembleConfig;
pub use providers::{FileAnthropicConfig, FileGeminiConfig, FileOpenAiConfig, FileProvidersConfig};
pub use server::FileServerConfig;

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// How serious a configuration issue is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Start-up must stop
    Error,
    /// Logged, start-up continues
    Warning,
}

/// One problem found by [`FileConfig::validate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending key, e.g. `ensemble.preview_rows`
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn error(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn warning(field: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// HTTP listener settings
    pub server: FileServerConfig,
    /// Fan-out and adjudication settings
    pub ensemble: FileEnsembleConfig,
    /// Provider endpoints, models and credential sources
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.server.bind.parse::<SocketAddr>().is_err() {
            issues.push(ConfigIssue::error(
                "server.bind",
                format!("'{}' is not a socket address", self.server.bind),
            ));
        }
        if self.server.max_upload_bytes == 0 {
            issues.push(ConfigIssue::error("server.max_upload_bytes", "cannot be 0"));
        }

        if self.ensemble.preview_rows == 0 {
            issues.push(ConfigIssue::error("ensemble.preview_rows", "cannot be 0"));
        }
        if self.ensemble.image_budget_bytes == 0 {
            issues.push(ConfigIssue::error("ensemble.image_budget_bytes", "cannot be 0"));
        }

        let providers = &self.providers;
        let models = [
            ("providers.openai.primary_model", &providers.openai.primary_model),
            ("providers.openai.secondary_model", &providers.openai.secondary_model),
            ("providers.openai.reviewer_model", &providers.openai.reviewer_model),
            ("providers.anthropic.model", &providers.anthropic.model),
            ("providers.gemini.model", &providers.gemini.model),
        ];
        for (field, model) in models {
            if model.trim().is_empty() {
                issues.push(ConfigIssue::error(field, "model name cannot be empty"));
            }
        }

        let timeouts = [
            ("providers.openai.timeout_secs", providers.openai.timeout_secs),
            ("providers.anthropic.timeout_secs", providers.anthropic.timeout_secs),
            ("providers.gemini.timeout_secs", providers.gemini.timeout_secs),
        ];
        for (field, secs) in timeouts {
            if secs == 0 {
                issues.push(ConfigIssue::error(field, "timeout cannot be 0"));
            }
        }

        if providers.anthropic.max_tokens == 0 {
            issues.push(ConfigIssue::error("providers.anthropic.max_tokens", "cannot be 0"));
        }

        let inline_keys = [
            ("providers.openai.api_key", providers.openai.api_key.is_some()),
            ("providers.anthropic.api_key", providers.anthropic.api_key.is_some()),
            ("providers.gemini.api_key", providers.gemini.api_key.is_some()),
        ];
        for (field, present) in inline_keys {
            if present {
                issues.push(ConfigIssue::warning(
                    field,
                    "API key stored in a config file; prefer the environment variable",
                ));
            }
        }

        issues
    }
}
