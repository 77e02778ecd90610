//! Request and response envelopes of the three provider APIs
//!
//! Only the fields the ensemble reads are modelled; everything else in a
//! response is ignored.

use quorum_application::BackendError;
use serde::{Deserialize, Serialize};

// ─── Chat completions ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

impl<'a> ChatMessage<'a> {
    pub fn system(content: &'a str) -> Self {
        Self {
            role: "system",
            content,
        }
    }

    pub fn user(content: &'a str) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`
    pub fn into_text(self) -> Result<String, BackendError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::MalformedResponse("empty choices".to_string()))?;
        choice
            .message
            .content
            .ok_or_else(|| BackendError::MalformedResponse("choice has no content".to_string()))
    }
}

// ─── Messages ────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct MessagesRequest<'a> {
    pub model: &'a str,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<MessagesContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct MessagesContentBlock {
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// `content[0].text`
    pub fn into_text(self) -> Result<String, BackendError> {
        let block = self
            .content
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::MalformedResponse("empty content".to_string()))?;
        block
            .text
            .ok_or_else(|| BackendError::MalformedResponse("first block has no text".to_string()))
    }
}

// ─── Generate content ────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
pub struct GeminiContent<'a> {
    pub parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct GeminiPart<'a> {
    pub text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn single_text(text: &'a str) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidateContent {
    #[serde(default)]
    pub parts: Vec<GeminiCandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct GeminiCandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`
    pub fn into_text(self) -> Result<String, BackendError> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::MalformedResponse("empty candidates".to_string()))?;
        candidate
            .content
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| {
                BackendError::MalformedResponse("first candidate has no text part".to_string())
            })
    }
}
