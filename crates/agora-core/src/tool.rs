//! Tool invocation records and the tool/executor contracts.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolResult;
use crate::identifiers::AgentId;
use crate::message::Payload;

/// A request to run a tool, as produced by an agent step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    /// Name of the tool to run
    pub tool_name: String,
    /// Arguments, shaped after the tool's prototype
    pub arguments: Payload,
    /// Agent on whose behalf the tool runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller: Option<AgentId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Payload>,
}

impl ToolInvocation {
    /// Create an invocation without caller or metadata.
    pub fn new(tool_name: impl Into<String>, arguments: Payload) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments,
            caller: None,
            metadata: None,
        }
    }

    /// Set the calling agent.
    pub fn with_caller(mut self, caller: AgentId) -> Self {
        self.caller = Some(caller);
        self
    }

    /// Attach metadata to the invocation.
    pub fn with_metadata(mut self, metadata: Payload) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Look up an argument by name.
    pub fn argument(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key)
    }
}

/// The result of running a tool.
///
/// When `error` is set the call failed logically; `output` may hold partial
/// data but must not be treated as a success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Tool that produced the response
    pub tool_name: String,
    /// Tool output, shaped after the tool's response schema
    pub output: Payload,
    /// Logical failure reported by the tool
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Payload>,
}

impl ToolResponse {
    /// Create a successful response.
    pub fn success(tool_name: impl Into<String>, output: Payload) -> Self {
        Self {
            tool_name: tool_name.into(),
            output,
            error: None,
            metadata: None,
        }
    }

    /// Create a response reporting a logical failure.
    pub fn failure(tool_name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            output: Payload::new(),
            error: Some(error.into()),
            metadata: None,
        }
    }

    /// Attach metadata to the response.
    pub fn with_metadata(mut self, metadata: Payload) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Check if the tool reported success.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Check if the tool reported a failure.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Discovery record describing a tool's interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMetadata {
    pub name: String,
    pub description: String,
    /// JSON schema of the expected arguments
    pub prototype: Value,
    /// JSON schema of the response output
    pub response_schema: Value,
}

/// A named, schema-described capability agents can invoke.
///
/// # Example
///
/// ```rust
/// use agora_core::tool::{Tool, ToolInvocation, ToolResponse};
/// use agora_core::{ToolError, ToolResult, to_payload};
/// use serde_json::{json, Value};
///
/// struct DoublingTool;
///
/// impl Tool for DoublingTool {
///     fn name(&self) -> &str {
///         "double"
///     }
///
///     fn prototype(&self) -> Value {
///         json!({"type": "object", "properties": {"value": {"type": "number"}}})
///     }
///
///     fn response_schema(&self) -> Value {
///         json!({"type": "object", "properties": {"result": {"type": "number"}}})
///     }
///
///     fn invoke(&self, invocation: &ToolInvocation) -> ToolResult<ToolResponse> {
///         let value = invocation
///             .argument("value")
///             .and_then(Value::as_f64)
///             .ok_or_else(|| ToolError::invalid_arguments(self.name(), "missing 'value'"))?;
///         Ok(ToolResponse::success(self.name(), to_payload(json!({"result": value * 2.0}))))
///     }
/// }
///
/// let tool = DoublingTool;
/// let call = ToolInvocation::new("double", to_payload(json!({"value": 5})));
/// assert_eq!(tool.invoke(&call).unwrap().output["result"], json!(10.0));
/// assert_eq!(tool.description(), "double");
/// ```
pub trait Tool: Send + Sync {
    /// Unique name within a registry.
    fn name(&self) -> &str;

    /// Human-readable description used by agents when choosing a tool.
    ///
    /// Defaults to the tool name.
    fn description(&self) -> &str {
        self.name()
    }

    /// JSON schema of the expected arguments.
    fn prototype(&self) -> Value;

    /// JSON schema of the response output.
    fn response_schema(&self) -> Value;

    /// Run the tool.
    fn invoke(&self, invocation: &ToolInvocation) -> ToolResult<ToolResponse>;

    /// Discovery record for this tool.
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: self.name().to_string(),
            description: self.description().to_string(),
            prototype: self.prototype(),
            response_schema: self.response_schema(),
        }
    }
}

/// Strategy for actually running tool invocations.
///
/// Environments expose one of these so tool execution can be swapped
/// (sandboxed, remote, rate-limited) without touching the orchestrator.
/// `execute` looks synchronous to the caller whatever the implementation
/// does underneath.
pub trait ToolExecutor: Send + Sync {
    /// Run one invocation and return its response.
    ///
    /// Unknown tools fail with [`ToolError::NotFound`](crate::ToolError::NotFound).
    fn execute(&self, invocation: &ToolInvocation) -> ToolResult<ToolResponse>;

    /// Discovery records of the tools this executor can run.
    fn list_tools(&self) -> Vec<ToolMetadata> {
        Vec::new()
    }
}
