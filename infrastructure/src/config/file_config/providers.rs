//! Provider configuration from TOML (`[providers]` section)

use quorum_domain::BackendId;
use serde::{Deserialize, Serialize};

/// OpenAI API provider configuration.
///
/// Serves both chat-completions backends and the reviewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API.
    pub base_url: String,
    /// Model for the primary backend.
    pub primary_model: String,
    /// Model for the secondary backend.
    pub secondary_model: String,
    /// Model for the adjudication call.
    pub reviewer_model: String,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            primary_model: BackendId::OpenAiPrimary.default_model().to_string(),
            secondary_model: BackendId::OpenAiSecondary.default_model().to_string(),
            reviewer_model: "gpt-4o".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Anthropic API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    pub model: String,
    /// Max tokens per response.
    pub max_tokens: u32,
    /// Anthropic API version header.
    pub api_version: String,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            model: BackendId::Anthropic.default_model().to_string(),
            max_tokens: 1000,
            api_version: "2023-06-01".to_string(),
            timeout_secs: 120,
        }
    }
}

/// Google generative language API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key (default: "GEMINI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (not recommended, use the env var instead).
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: BackendId::Gemini.default_model().to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// OpenAI API settings.
    pub openai: FileOpenAiConfig,
    /// Anthropic API settings.
    pub anthropic: FileAnthropicConfig,
    /// Gemini API settings.
    pub gemini: FileGeminiConfig,
}
