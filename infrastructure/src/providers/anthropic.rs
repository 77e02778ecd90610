//! Anthropic messages adapter

use super::types::{ChatMessage, MessagesRequest, MessagesResponse};
use super::{endpoint, send_json};
use async_trait::async_trait;
use quorum_application::{AnswerBackend, BackendError};
use quorum_domain::BackendId;
use tracing::debug;

const MESSAGES_PATH: &str = "/v1/messages";

/// HTTP client for `POST /v1/messages`
pub struct AnthropicClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
    api_version: String,
}

impl AnthropicClient {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key,
            model: model.into(),
            max_tokens: 1000,
            api_version: "2023-06-01".to_string(),
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }
}

#[async_trait]
impl AnswerBackend for AnthropicClient {
    fn id(&self) -> BackendId {
        BackendId::Anthropic
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn answer(&self, question: &str) -> Result<String, BackendError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| BackendError::Unavailable(format!("no API key for {}", self.model)))?;

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![ChatMessage::user(question)],
        };

        debug!(model = %self.model, max_tokens = self.max_tokens, "Sending messages request");

        let request = self
            .http
            .post(endpoint(&self.base_url, MESSAGES_PATH))
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body);

        let response: MessagesResponse = send_json(request).await?;
        response.into_text()
    }
}
