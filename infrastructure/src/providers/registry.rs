//! Backend registry - assembles adapters from configuration.

use super::{
    AnthropicClient, ChatCompletionsBackend, GeminiClient, OpenAiChatClient, build_http_client,
};
use crate::config::{FileProvidersConfig, ProviderCredentials};
use quorum_application::{AnswerBackend, ReviewGateway};
use quorum_domain::BackendId;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// All four ensemble backends plus the reviewer
///
/// Unconfigured backends are still present; the orchestrator filters them.
pub struct BackendRegistry {
    backends: Vec<Arc<dyn AnswerBackend>>,
    reviewer: Arc<OpenAiChatClient>,
}

impl BackendRegistry {
    pub fn from_config(
        config: &FileProvidersConfig,
        credentials: &ProviderCredentials,
    ) -> Result<Self, RegistryError> {
        let openai_http = build_http_client(Duration::from_secs(config.openai.timeout_secs))?;
        let anthropic_http = build_http_client(Duration::from_secs(config.anthropic.timeout_secs))?;
        let gemini_http = build_http_client(Duration::from_secs(config.gemini.timeout_secs))?;

        let openai = &config.openai;
        let chat = |model: &str| {
            OpenAiChatClient::new(
                openai_http.clone(),
                openai.base_url.clone(),
                credentials.openai.clone(),
                model,
            )
        };

        let backends: Vec<Arc<dyn AnswerBackend>> = vec![
            Arc::new(ChatCompletionsBackend::new(
                BackendId::OpenAiPrimary,
                chat(&openai.primary_model),
            )),
            Arc::new(ChatCompletionsBackend::new(
                BackendId::OpenAiSecondary,
                chat(&openai.secondary_model),
            )),
            Arc::new(
                AnthropicClient::new(
                    anthropic_http,
                    config.anthropic.base_url.clone(),
                    credentials.anthropic.clone(),
                    config.anthropic.model.clone(),
                )
                .with_max_tokens(config.anthropic.max_tokens)
                .with_api_version(config.anthropic.api_version.clone()),
            ),
            Arc::new(GeminiClient::new(
                gemini_http,
                config.gemini.base_url.clone(),
                credentials.gemini.clone(),
                config.gemini.model.clone(),
            )),
        ];
        let reviewer = Arc::new(chat(&openai.reviewer_model));

        let registry = Self { backends, reviewer };
        info!(
            active = ?registry.active_backends(),
            reviewer = %registry.reviewer.model(),
            "Backend registry assembled"
        );
        Ok(registry)
    }

    pub fn backends(&self) -> Vec<Arc<dyn AnswerBackend>> {
        self.backends.clone()
    }

    pub fn reviewer(&self) -> Arc<dyn ReviewGateway> {
        self.reviewer.clone()
    }

    /// Ids of backends holding a credential, in priority order
    pub fn active_backends(&self) -> Vec<BackendId> {
        let mut active: Vec<BackendId> = self
            .backends
            .iter()
            .filter(|b| b.is_configured())
            .map(|b| b.id())
            .collect();
        active.sort();
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(openai: bool, anthropic: bool, gemini: bool) -> ProviderCredentials {
        let key = |on: bool| on.then(|| "k".to_string());
        ProviderCredentials {
            openai: key(openai),
            anthropic: key(anthropic),
            gemini: key(gemini),
        }
    }

    #[test]
    fn test_all_four_backends_present_in_priority_order() {
        let registry =
            BackendRegistry::from_config(&FileProvidersConfig::default(), &credentials(true, true, true))
                .unwrap();

        let ids: Vec<_> = registry.backends().iter().map(|b| b.id()).collect();
        assert_eq!(ids, BackendId::ALL.to_vec());
        assert_eq!(registry.active_backends(), BackendId::ALL.to_vec());
    }

    #[test]
    fn test_openai_key_enables_two_backends_and_reviewer() {
        let registry = BackendRegistry::from_config(
            &FileProvidersConfig::default(),
            &credentials(true, false, false),
        )
        .unwrap();

        assert_eq!(
            registry.active_backends(),
            vec![BackendId::OpenAiPrimary, BackendId::OpenAiSecondary]
        );
        assert!(registry.reviewer().is_configured());
        assert_eq!(registry.reviewer().model(), "gpt-4o");
    }

    #[test]
    fn test_no_credentials_leaves_nothing_active() {
        let registry = BackendRegistry::from_config(
            &FileProvidersConfig::default(),
            &ProviderCredentials::default(),
        )
        .unwrap();

        assert!(registry.active_backends().is_empty());
        assert!(!registry.reviewer().is_configured());
    }

    #[test]
    fn test_configured_models_are_used() {
        let mut config = FileProvidersConfig::default();
        config.openai.secondary_model = "gpt-4.1-mini".to_string();
        config.gemini.model = "gemini-1.5-flash".to_string();

        let registry = BackendRegistry::from_config(&config, &credentials(true, true, true)).unwrap();
        let models: Vec<_> = registry
            .backends()
            .iter()
            .map(|b| b.model().to_string())
            .collect();
        assert_eq!(
            models,
            vec!["gpt-4o", "gpt-4.1-mini", "claude-3-opus-20240229", "gemini-1.5-flash"]
        );
    }
}
