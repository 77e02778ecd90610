//! Review gateway port
//!
//! The single model call that adjudicates between candidates.

use super::answer_backend::BackendError;
use async_trait::async_trait;

/// Gateway to the reviewer model
#[async_trait]
pub trait ReviewGateway: Send + Sync {
    /// Model name of the reviewer
    fn model(&self) -> &str;

    /// Whether a credential is present
    fn is_configured(&self) -> bool;

    /// Send a system prompt plus one user prompt and return the raw content
    async fn review(&self, system_prompt: &str, prompt: &str) -> Result<String, BackendError>;
}
