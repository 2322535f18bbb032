//! Language model client errors.

use thiserror::Error;

/// Errors surfaced by [`LlmClient`](crate::llm::LlmClient) implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LlmError {
    /// The request could not be completed.
    #[error("LLM request failed: {0}")]
    RequestFailed(String),

    /// The provider answered with something that could not be interpreted.
    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),

    /// The client has no streaming interface.
    #[error("Streaming not implemented for this client")]
    StreamingUnsupported,
}
