//! Configuration loading for answer-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ANSWER_QUORUM_*` environment overrides
//! 2. `--config <path>` specified file
//! 3. Project root: `./answer-quorum.toml` or `./.answer-quorum.toml`
//! 4. Global: `~/.config/answer-quorum/config.toml`
//! 5. Default values
//!
//! Provider API keys are resolved separately by [`ProviderCredentials`].

mod credentials;
mod file_config;
mod loader;

pub use credentials::ProviderCredentials;
pub use file_config::{
    ConfigIssue, FileAnthropicConfig, FileConfig, FileEnsembleConfig, FileGeminiConfig,
    FileOpenAiConfig, FileProvidersConfig, FileServerConfig, Severity,
};
pub use loader::{ConfigLoader, ENV_PREFIX};
