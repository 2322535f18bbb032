//! Error Types
//!
//! Domain-specific failures of the orchestration core's collaborators.
//!
//! - `tool`: registry lookup, registration and tool execution errors
//! - `agent`: agent step and environment errors
//! - `llm`: language model client errors
//!
//! Identifier validation errors live next to the identifiers themselves.

mod agent;
mod llm;
mod tool;

pub use agent::{AgentError, AgentResult, EnvironmentError, EnvironmentResult};
pub use llm::LlmError;
pub use tool::{ToolError, ToolResult};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::{IdValidationError, ToolId};

    #[test]
    fn test_tool_error_not_found() {
        let error = ToolError::not_found("missing");
        assert_eq!(error.tool_name(), Some("missing"));
        assert_eq!(error.to_string(), "Tool 'missing' not found in registry");
        assert_eq!(error.error_code(), "TOOL_NOT_FOUND");
    }

    #[test]
    fn test_tool_error_duplicate() {
        let error = ToolError::Duplicate {
            name: ToolId::parse("double").unwrap(),
        };
        assert_eq!(error.tool_name(), Some("double"));
        assert!(error.to_string().contains("already registered"));
    }

    #[test]
    fn test_tool_error_invalid_id_has_source() {
        use std::error::Error;

        let error = ToolError::InvalidToolId {
            attempted_name: "bad name".to_string(),
            validation_error: IdValidationError::InvalidCharacter(' '),
        };
        assert_eq!(error.tool_name(), None);
        assert!(error.source().is_some());
    }

    #[test]
    fn test_tool_error_execution_failed() {
        let error = ToolError::execution_failed("double", "overflow");
        assert!(error.to_string().contains("execution failed"));
        assert!(error.to_string().contains("overflow"));
    }

    #[test]
    fn test_environment_error_wraps_tool_error() {
        let env_error: EnvironmentError = ToolError::not_found("double").into();
        assert!(matches!(env_error, EnvironmentError::Tool(_)));
        assert_eq!(env_error.error_code(), "ENV_TOOL_ERROR");
    }

    #[test]
    fn test_agent_error_wraps_llm_error() {
        let agent_error: AgentError = LlmError::RequestFailed("timeout".to_string()).into();
        assert_eq!(agent_error.error_code(), "AGENT_LLM_ERROR");
        assert!(agent_error.to_string().contains("timeout"));
    }
}
