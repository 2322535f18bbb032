//! Tool lookup, registration and execution errors.

use thiserror::Error;

use crate::identifiers::{IdValidationError, ToolId};

/// Errors raised by tool registries, executors and tool bodies.
///
/// A tool reporting a *logical* failure should return a
/// [`ToolResponse`](crate::tool::ToolResponse) with `error` set instead;
/// a `ToolError` aborts whatever operation is running the tool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Tool was not found in the registry.
    #[error("Tool '{name}' not found in registry")]
    NotFound {
        /// Name that was looked up
        name: String,
    },

    /// A tool with the same name is already registered.
    #[error("Tool '{name}' is already registered")]
    Duplicate {
        /// Name of the existing tool
        name: ToolId,
    },

    /// Tool name failed identifier validation.
    #[error("Invalid tool ID '{attempted_name}': {validation_error}")]
    InvalidToolId {
        /// The rejected name
        attempted_name: String,
        /// Validation error details
        #[source]
        validation_error: IdValidationError,
    },

    /// Invocation arguments did not match the tool prototype.
    #[error("Tool '{tool}' received invalid arguments: {reason}")]
    InvalidArguments {
        /// Tool that rejected the arguments
        tool: String,
        /// Why the arguments were rejected
        reason: String,
    },

    /// Tool body failed unexpectedly.
    #[error("Tool '{tool}' execution failed: {message}")]
    ExecutionFailed {
        /// Tool that failed
        tool: String,
        /// Error message from the tool execution
        message: String,
    },
}

impl ToolError {
    /// Create a NotFound error from a tool name.
    pub fn not_found(name: impl Into<String>) -> Self {
        ToolError::NotFound { name: name.into() }
    }

    /// Create an InvalidArguments error.
    pub fn invalid_arguments(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        ToolError::InvalidArguments {
            tool: tool.into(),
            reason: reason.into(),
        }
    }

    /// Create an ExecutionFailed error.
    pub fn execution_failed(tool: impl Into<String>, message: impl Into<String>) -> Self {
        ToolError::ExecutionFailed {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Get the tool name associated with this error, if available.
    pub fn tool_name(&self) -> Option<&str> {
        match self {
            ToolError::NotFound { name } => Some(name),
            ToolError::Duplicate { name } => Some(name.as_str()),
            ToolError::InvalidArguments { tool, .. } | ToolError::ExecutionFailed { tool, .. } => {
                Some(tool)
            }
            ToolError::InvalidToolId { .. } => None,
        }
    }

    /// Stable error code suitable for logging or reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            ToolError::NotFound { .. } => "TOOL_NOT_FOUND",
            ToolError::Duplicate { .. } => "TOOL_DUPLICATE",
            ToolError::InvalidToolId { .. } => "TOOL_INVALID_ID",
            ToolError::InvalidArguments { .. } => "TOOL_INVALID_ARGUMENTS",
            ToolError::ExecutionFailed { .. } => "TOOL_EXECUTION_FAILED",
        }
    }
}

/// Result type alias for tool operations.
pub type ToolResult<T> = Result<T, ToolError>;
