//! Backend identifier value object

use super::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The answering backends (Value Object)
///
/// Declaration order is the fixed priority order; candidates are always
/// collected in this order regardless of which backend finishes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackendId {
    /// Primary chat-completions model (gpt-4o)
    OpenAiPrimary,
    /// Secondary chat-completions model (gpt-4o-mini)
    OpenAiSecondary,
    /// Messages-API model
    Anthropic,
    /// Generate-content model
    Gemini,
}

impl BackendId {
    /// All backends in priority order
    pub const ALL: [BackendId; 4] = [
        BackendId::OpenAiPrimary,
        BackendId::OpenAiSecondary,
        BackendId::Anthropic,
        BackendId::Gemini,
    ];

    /// Get the string identifier for this backend
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendId::OpenAiPrimary => "openai-primary",
            BackendId::OpenAiSecondary => "openai-secondary",
            BackendId::Anthropic => "anthropic",
            BackendId::Gemini => "gemini",
        }
    }

    /// Model used when configuration does not override it
    pub fn default_model(&self) -> &'static str {
        match self {
            BackendId::OpenAiPrimary => "gpt-4o",
            BackendId::OpenAiSecondary => "gpt-4o-mini",
            BackendId::Anthropic => "claude-3-opus-20240229",
            BackendId::Gemini => "gemini-pro",
        }
    }
}

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BackendId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BackendId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DomainError::UnknownBackend(s.to_string()))
    }
}

impl Serialize for BackendId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BackendId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
