//! Hosted model adapters
//!
//! Each adapter speaks one provider wire format over `reqwest` and
//! implements [`AnswerBackend`](quorum_application::AnswerBackend) (and, for
//! chat completions, [`ReviewGateway`](quorum_application::ReviewGateway)).
//! [`BackendRegistry`] builds the full set from configuration.

pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod registry;
pub mod types;

pub use anthropic::AnthropicClient;
pub use gemini::GeminiClient;
pub use openai::{ChatCompletionsBackend, OpenAiChatClient};
pub use registry::{BackendRegistry, RegistryError};

use quorum_application::BackendError;
use quorum_domain::excerpt;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Longest provider error body kept in a `BackendError::Status`
const ERROR_BODY_EXCERPT: usize = 200;

pub(crate) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(timeout).build()
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Send a prepared request and decode a 2xx JSON body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, BackendError> {
    let response = request.send().await.map_err(transport_error)?;
    let status = response.status();
    let body = response.text().await.map_err(transport_error)?;

    if !status.is_success() {
        return Err(BackendError::Status {
            status: status.as_u16(),
            body: excerpt(&body, ERROR_BODY_EXCERPT),
        });
    }

    serde_json::from_str(&body).map_err(|e| BackendError::MalformedResponse(e.to_string()))
}

// URLs may carry a key in the query string
fn transport_error(e: reqwest::Error) -> BackendError {
    let timed_out = e.is_timeout();
    let message = e.without_url().to_string();
    if timed_out {
        BackendError::Timeout(message)
    } else {
        BackendError::Request(message)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use types::ChatCompletionResponse;

    #[test]
    fn test_endpoint_joins_slashes() {
        assert_eq!(
            endpoint("https://api.openai.com/", "/v1/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(endpoint("http://h:1", "v1/messages"), "http://h:1/v1/messages");
    }

    #[tokio::test]
    async fn test_send_json_maps_status_error() {
        let server = stub::spawn(429, r#"{"error": {"message": "rate   limited"}}"#).await;
        let client = build_http_client(Duration::from_secs(5)).unwrap();

        let result: Result<ChatCompletionResponse, _> =
            send_json(client.post(endpoint(&server.base_url, "/x"))).await;

        assert_eq!(
            result.unwrap_err(),
            BackendError::Status {
                status: 429,
                body: r#"{"error": {"message": "rate limited"}}"#.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_send_json_rejects_non_json_body() {
        let server = stub::spawn(200, "<html>oops</html>").await;
        let client = build_http_client(Duration::from_secs(5)).unwrap();

        let result: Result<ChatCompletionResponse, _> =
            send_json(client.post(endpoint(&server.base_url, "/x"))).await;

        assert!(matches!(result, Err(BackendError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_send_json_maps_client_timeout() {
        let server = stub::spawn_delayed(200, "{}", Duration::from_secs(2)).await;
        let client = build_http_client(Duration::from_millis(50)).unwrap();

        let result: Result<ChatCompletionResponse, _> =
            send_json(client.post(endpoint(&server.base_url, "/x"))).await;

        assert!(result.unwrap_err().is_timeout());
    }
}
