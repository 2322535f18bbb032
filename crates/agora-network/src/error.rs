//! Error types for network operations

use agora_core::{AgentError, AgentId, EnvironmentError, ToolError};
use thiserror::Error;

/// Result type for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Environment operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvironmentPhase {
    ValidateAgents,
    Reset,
    Step,
}

impl EnvironmentPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvironmentPhase::ValidateAgents => "validate_agents",
            EnvironmentPhase::Reset => "reset",
            EnvironmentPhase::Step => "step",
        }
    }
}

impl std::fmt::Display for EnvironmentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while driving an agentic network
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetworkError {
    /// An agent with the same id is already registered
    #[error("Agent '{agent}' is already registered")]
    AgentAlreadyRegistered { agent: AgentId },

    /// `step` was called before the first `reset`
    #[error("Network must be reset before it can step")]
    NotReset,

    /// `step` was called after the environment ended the episode
    #[error("Episode has terminated; reset the network to continue")]
    EpisodeTerminated,

    /// A tool invocation names a caller other than the agent that produced it
    #[error("Agent '{agent}' produced a tool invocation on behalf of '{caller}'")]
    CallerMismatch { agent: AgentId, caller: AgentId },

    /// A message names a sender other than the agent that produced it
    #[error("Agent '{agent}' produced a message on behalf of '{sender}'")]
    SenderMismatch { agent: AgentId, sender: AgentId },

    /// An agent failed to step
    #[error("Agent '{agent}' failed: {source}")]
    Agent {
        agent: AgentId,
        #[source]
        source: AgentError,
    },

    /// A streamed tool call failed
    #[error("Tool call from agent '{agent}' failed: {source}")]
    Tool {
        agent: AgentId,
        #[source]
        source: ToolError,
    },

    /// The environment failed or rejected an operation
    #[error("Environment {phase} failed: {source}")]
    Environment {
        phase: EnvironmentPhase,
        #[source]
        source: EnvironmentError,
    },
}

impl NetworkError {
    pub(crate) fn environment(phase: EnvironmentPhase, source: EnvironmentError) -> Self {
        NetworkError::Environment { phase, source }
    }

    /// Whether this error reports API misuse rather than a collaborator failure.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            NetworkError::AgentAlreadyRegistered { .. }
                | NetworkError::NotReset
                | NetworkError::EpisodeTerminated
                | NetworkError::CallerMismatch { .. }
                | NetworkError::SenderMismatch { .. }
        )
    }

    /// Stable error code suitable for logging or reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            NetworkError::AgentAlreadyRegistered { .. } => "NETWORK_AGENT_ALREADY_REGISTERED",
            NetworkError::NotReset => "NETWORK_NOT_RESET",
            NetworkError::EpisodeTerminated => "NETWORK_EPISODE_TERMINATED",
            NetworkError::CallerMismatch { .. } => "NETWORK_CALLER_MISMATCH",
            NetworkError::SenderMismatch { .. } => "NETWORK_SENDER_MISMATCH",
            NetworkError::Agent { .. } => "NETWORK_AGENT_FAILED",
            NetworkError::Tool { .. } => "NETWORK_TOOL_FAILED",
            NetworkError::Environment { .. } => "NETWORK_ENVIRONMENT_FAILED",
        }
    }
}
