//! Agent and environment collaborator errors.
//!
//! The orchestrator never inspects these beyond wrapping them with the
//! agent or phase that produced them; they exist so implementations can
//! fail a tick with a typed reason instead of panicking.

use thiserror::Error;

use super::llm::LlmError;
use super::tool::ToolError;
use crate::identifiers::AgentId;

/// Errors an agent may return from its step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    /// Agent failed to produce a step output.
    #[error("Agent step failed: {reason}")]
    StepFailed { reason: String },

    /// The language model backing the agent failed.
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl AgentError {
    /// Create a StepFailed error.
    pub fn step_failed(reason: impl Into<String>) -> Self {
        AgentError::StepFailed {
            reason: reason.into(),
        }
    }

    /// Stable error code suitable for logging or reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            AgentError::StepFailed { .. } => "AGENT_STEP_FAILED",
            AgentError::Llm(_) => "AGENT_LLM_ERROR",
        }
    }
}

/// Errors an environment may return from reset, step or roster validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvironmentError {
    /// The environment refuses the proposed agent roster.
    #[error("Agent roster rejected: {reason}")]
    RosterRejected { reason: String },

    /// An agent's action could not be applied.
    #[error("Invalid action from agent '{agent}': {reason}")]
    InvalidAction { agent: AgentId, reason: String },

    /// World state could not be re-initialized.
    #[error("Environment reset failed: {reason}")]
    ResetFailed { reason: String },

    /// World state could not be advanced.
    #[error("Environment step failed: {reason}")]
    StepFailed { reason: String },

    /// A deferred tool call failed and the environment chose to raise it.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

impl EnvironmentError {
    /// Create a RosterRejected error.
    pub fn roster_rejected(reason: impl Into<String>) -> Self {
        EnvironmentError::RosterRejected {
            reason: reason.into(),
        }
    }

    /// Create an InvalidAction error.
    pub fn invalid_action(agent: AgentId, reason: impl Into<String>) -> Self {
        EnvironmentError::InvalidAction {
            agent,
            reason: reason.into(),
        }
    }

    /// Create a ResetFailed error.
    pub fn reset_failed(reason: impl Into<String>) -> Self {
        EnvironmentError::ResetFailed {
            reason: reason.into(),
        }
    }

    /// Create a StepFailed error.
    pub fn step_failed(reason: impl Into<String>) -> Self {
        EnvironmentError::StepFailed {
            reason: reason.into(),
        }
    }

    /// Stable error code suitable for logging or reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            EnvironmentError::RosterRejected { .. } => "ENV_ROSTER_REJECTED",
            EnvironmentError::InvalidAction { .. } => "ENV_INVALID_ACTION",
            EnvironmentError::ResetFailed { .. } => "ENV_RESET_FAILED",
            EnvironmentError::StepFailed { .. } => "ENV_STEP_FAILED",
            EnvironmentError::Tool(_) => "ENV_TOOL_ERROR",
        }
    }
}

/// Result type alias for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Result type alias for environment operations.
pub type EnvironmentResult<T> = Result<T, EnvironmentError>;
