//! Gemini generate-content adapter

use super::types::{GenerateContentRequest, GenerateContentResponse};
use super::{endpoint, send_json};
use async_trait::async_trait;
use quorum_application::{AnswerBackend, BackendError};
use quorum_domain::BackendId;
use tracing::debug;

/// HTTP client for `POST /v1/models/{model}:generateContent`
///
/// The key travels as the `key` query parameter.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
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
}

#[async_trait]
impl AnswerBackend for GeminiClient {
    fn id(&self) -> BackendId {
        BackendId::Gemini
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

        debug!(model = %self.model, "Sending generate content request");

        let path = format!("/v1/models/{}:generateContent", self.model);
        let request = self
            .http
            .post(endpoint(&self.base_url, &path))
            .query(&[("key", api_key)])
            .json(&GenerateContentRequest::single_text(question));

        let response: GenerateContentResponse = send_json(request).await?;
        response.into_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::{build_http_client, stub};
    use serde_json::json;
    use std::time::Duration;

    fn client(base_url: &str) -> GeminiClient {
        GeminiClient::new(
            build_http_client(Duration::from_secs(5)).unwrap(),
            base_url,
            Some("g-test".to_string()),
            "gemini-pro",
        )
    }

    #[tokio::test]
    async fn test_sends_key_as_query_parameter() {
        let server = stub::spawn(
            200,
            r#"{"candidates": [{"content": {"parts": [{"text": "4"}]}}]}"#,
        )
        .await;

        let answer = client(&server.base_url).answer("What is 2+2?").await.unwrap();
        assert_eq!(answer, "4");

        let request = server.single_request();
        assert_eq!(
            request.path_and_query,
            "/v1/models/gemini-pro:generateContent?key=g-test"
        );
        assert!(request.headers.get("authorization").is_none());
        assert_eq!(
            request.body,
            json!({"contents": [{"parts": [{"text": "What is 2+2?"}]}]})
        );
    }

    #[tokio::test]
    async fn test_empty_candidates_is_malformed() {
        let server = stub::spawn(200, r#"{"candidates": []}"#).await;

        let err = client(&server.base_url).answer("q").await.unwrap_err();
        assert!(matches!(err, BackendError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_server_error_body_is_excerpted() {
        let server = stub::spawn(503, r#"{"error": {"code": 503, "status": "UNAVAILABLE"}}"#).await;

        match client(&server.base_url).answer("q").await.unwrap_err() {
            BackendError::Status { status, body } => {
                assert_eq!(status, 503);
                assert!(body.contains("UNAVAILABLE"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
