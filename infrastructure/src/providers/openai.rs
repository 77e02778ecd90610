//! OpenAI chat completions adapter
//!
//! One [`OpenAiChatClient`] per model. Wrapped in a [`ChatCompletionsBackend`]
//! it answers ensemble questions; used directly it is the reviewer.

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::{endpoint, send_json};
use async_trait::async_trait;
use quorum_application::{AnswerBackend, BackendError, ReviewGateway};
use quorum_domain::BackendId;
use tracing::debug;

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// HTTP client for `POST /v1/chat/completions`
#[derive(Clone)]
pub struct OpenAiChatClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiChatClient {
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
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send the messages at temperature 0 and return `choices[0].message.content`
    pub async fn complete(&self, messages: Vec<ChatMessage<'_>>) -> Result<String, BackendError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| BackendError::Unavailable(format!("no API key for {}", self.model)))?;

        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: 0.0,
        };

        debug!(model = %self.model, "Sending chat completion request");

        let request = self
            .http
            .post(endpoint(&self.base_url, CHAT_COMPLETIONS_PATH))
            .bearer_auth(api_key)
            .json(&body);

        let response: ChatCompletionResponse = send_json(request).await?;
        response.into_text()
    }
}

#[async_trait]
impl ReviewGateway for OpenAiChatClient {
    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn review(&self, system_prompt: &str, prompt: &str) -> Result<String, BackendError> {
        self.complete(vec![ChatMessage::system(system_prompt), ChatMessage::user(prompt)])
            .await
    }
}

/// A chat completions client serving one ensemble slot
pub struct ChatCompletionsBackend {
    id: BackendId,
    client: OpenAiChatClient,
}

impl ChatCompletionsBackend {
    pub fn new(id: BackendId, client: OpenAiChatClient) -> Self {
        Self { id, client }
    }
}

#[async_trait]
impl AnswerBackend for ChatCompletionsBackend {
    fn id(&self) -> BackendId {
        self.id
    }

    fn model(&self) -> &str {
        self.client.model()
    }

    fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    async fn answer(&self, question: &str) -> Result<String, BackendError> {
        self.client.complete(vec![ChatMessage::user(question)]).await
    }
}
