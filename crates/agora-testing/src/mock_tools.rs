//! # Mock Tools for Testing
//!
//! Tool implementations with predictable responses and call tracking.

use agora_core::{
    AgentId, Payload, Tool, ToolError, ToolExecutor, ToolInvocation, ToolResponse, ToolResult,
    to_payload,
};
use agora_tools::{DefaultToolExecutor, ToolRegistry};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex, PoisonError};

/// `double`: answers `{"result": value * 2}`.
///
/// Integers stay integers; a missing or non-numeric `value` is an
/// [`ToolError::InvalidArguments`] error.
#[derive(Debug, Clone, Copy, Default)]
pub struct DoublingTool;

impl Tool for DoublingTool {
    fn name(&self) -> &str {
        "double"
    }

    fn description(&self) -> &str {
        "Doubles the numeric 'value' argument"
    }

    fn prototype(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"value": {"type": "number"}},
            "required": ["value"]
        })
    }

    fn response_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"result": {"type": "number"}}
        })
    }

    fn invoke(&self, invocation: &ToolInvocation) -> ToolResult<ToolResponse> {
        let value = invocation
            .argument("value")
            .ok_or_else(|| ToolError::invalid_arguments(self.name(), "missing 'value'"))?;

        let result = if let Some(int) = value.as_i64() {
            int.checked_mul(2)
                .map(Value::from)
                .ok_or_else(|| ToolError::execution_failed(self.name(), "integer overflow"))?
        } else if let Some(float) = value.as_f64() {
            json!(float * 2.0)
        } else {
            return Err(ToolError::invalid_arguments(
                self.name(),
                "'value' must be a number",
            ));
        };

        Ok(ToolResponse::success(
            self.name(),
            to_payload(json!({"result": result})),
        ))
    }
}

#[derive(Debug, Clone)]
enum MockBehavior {
    Respond(Payload),
    ReportFailure(String),
    Raise(ToolError),
}

/// A tool with a fixed answer that remembers every invocation.
///
/// Clones share their call history, so a test can keep one clone while the
/// other sits in a registry.
#[derive(Debug, Clone)]
pub struct MockTool {
    name: String,
    behavior: MockBehavior,
    call_history: Arc<Mutex<Vec<ToolInvocation>>>,
}

impl MockTool {
    /// Create a mock tool that answers with its arguments.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            behavior: MockBehavior::Respond(Payload::new()),
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every call with this output.
    pub fn with_output(mut self, output: Value) -> Self {
        self.behavior = MockBehavior::Respond(to_payload(output));
        self
    }

    /// Answer every call with a logical failure.
    pub fn with_failure(mut self, error: impl Into<String>) -> Self {
        self.behavior = MockBehavior::ReportFailure(error.into());
        self
    }

    /// Fail every call with a raised error.
    pub fn raising(mut self, error: ToolError) -> Self {
        self.behavior = MockBehavior::Raise(error);
        self
    }

    /// Get the number of times this tool has been called
    pub fn call_count(&self) -> usize {
        self.history().len()
    }

    /// Get every invocation this tool received
    pub fn call_history(&self) -> Vec<ToolInvocation> {
        self.history().clone()
    }

    /// Check if the tool was called on behalf of an agent
    pub fn was_called_by(&self, agent: &AgentId) -> bool {
        self.history()
            .iter()
            .any(|invocation| invocation.caller.as_ref() == Some(agent))
    }

    /// Forget recorded calls
    pub fn reset(&self) {
        self.history().clear();
    }

    fn history(&self) -> std::sync::MutexGuard<'_, Vec<ToolInvocation>> {
        self.call_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Tool for MockTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn prototype(&self) -> Value {
        json!({"type": "object"})
    }

    fn response_schema(&self) -> Value {
        json!({"type": "object"})
    }

    fn invoke(&self, invocation: &ToolInvocation) -> ToolResult<ToolResponse> {
        self.history().push(invocation.clone());

        match &self.behavior {
            MockBehavior::Respond(output) if output.is_empty() => Ok(ToolResponse::success(
                &self.name,
                invocation.arguments.clone(),
            )),
            MockBehavior::Respond(output) => Ok(ToolResponse::success(&self.name, output.clone())),
            MockBehavior::ReportFailure(error) => Ok(ToolResponse::failure(&self.name, error)),
            MockBehavior::Raise(error) => Err(error.clone()),
        }
    }
}

/// Build an executor over a registry holding the given tools.
///
/// # Panics
///
/// Panics if two tools share a name or a name is invalid.
pub fn executor_with(tools: Vec<Arc<dyn Tool>>) -> Arc<dyn ToolExecutor> {
    let registry = ToolRegistry::from_tools(tools).expect("valid mock tool set");
    Arc::new(DefaultToolExecutor::from(registry))
}

/// Executor offering only [`DoublingTool`].
pub fn doubling_executor() -> Arc<dyn ToolExecutor> {
    executor_with(vec![Arc::new(DoublingTool)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double(value: Value) -> ToolResult<ToolResponse> {
        DoublingTool.invoke(&ToolInvocation::new("double", to_payload(json!({"value": value}))))
    }

    #[test]
    fn doubling_tool_keeps_integers() {
        assert_eq!(double(json!(5)).unwrap().output["result"], json!(10));
        assert_eq!(double(json!(1.5)).unwrap().output["result"], json!(3.0));
        assert!(double(json!("five")).is_err());
        assert!(double(json!(i64::MAX)).is_err());
    }

    #[test]
    fn mock_tool_tracks_calls_across_clones() {
        let tool = MockTool::new("lookup").with_output(json!({"answer": 42}));
        let handle = tool.clone();
        let caller = AgentId::parse("agent-1").unwrap();

        let call = ToolInvocation::new("lookup", Payload::new()).with_caller(caller.clone());
        let response = tool.invoke(&call).unwrap();

        assert_eq!(response.output["answer"], json!(42));
        assert_eq!(handle.call_count(), 1);
        assert!(handle.was_called_by(&caller));

        handle.reset();
        assert_eq!(tool.call_count(), 0);
    }

    #[test]
    fn mock_tool_failure_modes() {
        let call = ToolInvocation::new("flaky", Payload::new());

        let reported = MockTool::new("flaky").with_failure("try later");
        assert!(reported.invoke(&call).unwrap().is_failure());

        let raised = MockTool::new("flaky").raising(ToolError::execution_failed("flaky", "down"));
        assert!(raised.invoke(&call).is_err());
        assert_eq!(raised.call_count(), 1);
    }

    #[test]
    fn mock_tool_echoes_arguments_by_default() {
        let call = ToolInvocation::new("echo", to_payload(json!({"text": "hi"})));
        let response = MockTool::new("echo").invoke(&call).unwrap();
        assert_eq!(response.output["text"], "hi");
    }

    #[test]
    fn doubling_executor_lists_tool() {
        let executor = doubling_executor();
        assert_eq!(executor.list_tools()[0].name, "double");
    }
}
