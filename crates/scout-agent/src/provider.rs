//! Provider abstraction over LLM backends.

use async_trait::async_trait;

use crate::completion::{CompletionRequest, CompletionResponse};
use crate::error::Result;

/// A backend capable of serving completion requests.
///
/// Implementations are expected to be cheap to clone behind an `Arc` and
/// safe to share across tasks.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Request a completion from the backend.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Short identifier for the backend, used in logs.
    fn name(&self) -> &str;
}
