use agora_core::{Tool, ToolError, ToolId, ToolInvocation, ToolMetadata, ToolResponse, ToolResult};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A tool together with the validated name it was registered under.
#[derive(Clone)]
pub struct RegisteredTool {
    pub id: ToolId,
    pub tool: Arc<dyn Tool>,
}

impl fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Name-keyed store of tool implementations.
///
/// Tools are kept in registration order so discovery output is stable.
/// Registries are read-mostly once set up; lookups are linear, which is
/// fine for the handful of tools an agent network carries.
///
/// # Example
///
/// ```rust
/// use agora_tools::ToolRegistry;
/// use agora_core::{Tool, ToolInvocation, ToolResponse, ToolResult, to_payload};
/// use serde_json::{json, Value};
/// use std::sync::Arc;
///
/// struct EchoTool;
///
/// impl Tool for EchoTool {
///     fn name(&self) -> &str { "echo" }
///     fn prototype(&self) -> Value { json!({"type": "object"}) }
///     fn response_schema(&self) -> Value { json!({"type": "object"}) }
///     fn invoke(&self, invocation: &ToolInvocation) -> ToolResult<ToolResponse> {
///         Ok(ToolResponse::success("echo", invocation.arguments.clone()))
///     }
/// }
///
/// let mut registry = ToolRegistry::new();
/// registry.register(Arc::new(EchoTool)).unwrap();
///
/// let call = ToolInvocation::new("echo", to_payload(json!({"text": "hello"})));
/// let response = registry.invoke(&call).unwrap();
/// assert_eq!(response.output["text"], "hello");
/// ```
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    /// Create a new empty tool registry.
    pub fn new() -> Self {
        Self { tools: Vec::new() }
    }

    /// Build a registry from a set of tools.
    ///
    /// # Returns
    ///
    /// `Err(ToolError::Duplicate)` if two tools share a name, or
    /// `Err(ToolError::InvalidToolId)` if a name fails validation
    pub fn from_tools<I>(tools: I) -> ToolResult<Self>
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        let mut registry = Self::new();
        for tool in tools {
            registry.register(tool)?;
        }
        Ok(registry)
    }

    /// Register a tool, refusing to replace an existing one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> ToolResult<()> {
        self.register_with(tool, false)
    }

    /// Register a tool.
    ///
    /// # Parameters
    ///
    /// * `tool` - The tool implementation wrapped in `Arc` for sharing
    /// * `overwrite` - Replace an existing tool with the same name instead
    ///   of failing. The replacement keeps the original registration slot.
    ///
    /// # Returns
    ///
    /// `Err(ToolError::Duplicate)` if the name is taken and `overwrite` is
    /// false; the existing registration is left untouched
    pub fn register_with(&mut self, tool: Arc<dyn Tool>, overwrite: bool) -> ToolResult<()> {
        let id = ToolId::parse(tool.name()).map_err(|validation_error| {
            ToolError::InvalidToolId {
                attempted_name: tool.name().to_string(),
                validation_error,
            }
        })?;

        match self.position(id.as_str()) {
            Some(_) if !overwrite => Err(ToolError::Duplicate { name: id }),
            Some(index) => {
                debug!(tool = %id, "Replacing registered tool");
                self.tools[index].tool = tool;
                Ok(())
            }
            None => {
                debug!(tool = %id, "Registered tool");
                self.tools.push(RegisteredTool { id, tool });
                Ok(())
            }
        }
    }

    /// Remove a tool by name and return it.
    pub fn unregister(&mut self, name: &str) -> ToolResult<Arc<dyn Tool>> {
        let index = self.position(name).ok_or_else(|| ToolError::not_found(name))?;
        let removed = self.tools.remove(index);
        debug!(tool = %removed.id, "Unregistered tool");
        Ok(removed.tool)
    }

    /// Get a tool by name.
    pub fn get(&self, name: &str) -> ToolResult<Arc<dyn Tool>> {
        self.tools
            .iter()
            .find(|registered| registered.id.as_str() == name)
            .map(|registered| Arc::clone(&registered.tool))
            .ok_or_else(|| ToolError::not_found(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Resolve the tool named by the invocation and run it.
    ///
    /// Failures raised by the tool propagate unchanged.
    pub fn invoke(&self, invocation: &ToolInvocation) -> ToolResult<ToolResponse> {
        self.get(&invocation.tool_name)?.invoke(invocation)
    }

    /// Discovery snapshot of every tool, in registration order.
    pub fn list_tools(&self) -> Vec<ToolMetadata> {
        self.tools
            .iter()
            .map(|registered| registered.tool.metadata())
            .collect()
    }

    /// Iterate over registered tools in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredTool> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.tools
            .iter()
            .position(|registered| registered.id.as_str() == name)
    }
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|registered| registered.id.as_str()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::to_payload;
    use serde_json::{Value, json};

    struct UppercaseTool;

    impl Tool for UppercaseTool {
        fn name(&self) -> &str {
            "uppercase"
        }

        fn prototype(&self) -> Value {
            json!({"type": "object", "properties": {"text": {"type": "string"}}})
        }

        fn response_schema(&self) -> Value {
            json!({"type": "object", "properties": {"text": {"type": "string"}}})
        }

        fn invoke(&self, invocation: &ToolInvocation) -> ToolResult<ToolResponse> {
            let text = invocation
                .argument("text")
                .and_then(Value::as_str)
                .ok_or_else(|| ToolError::invalid_arguments(self.name(), "missing 'text'"))?;
            Ok(ToolResponse::success(
                self.name(),
                to_payload(json!({"text": text.to_uppercase()})),
            ))
        }
    }

    struct ReverseTool {
        name: &'static str,
    }

    impl Tool for ReverseTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            "Reverses text"
        }

        fn prototype(&self) -> Value {
            json!({"type": "object"})
        }

        fn response_schema(&self) -> Value {
            json!({"type": "object"})
        }

        fn invoke(&self, invocation: &ToolInvocation) -> ToolResult<ToolResponse> {
            let text = invocation
                .argument("text")
                .and_then(Value::as_str)
                .unwrap_or_default();
            Ok(ToolResponse::success(
                self.name(),
                to_payload(json!({"text": text.chars().rev().collect::<String>()})),
            ))
        }
    }

    fn text_call(tool: &str, text: &str) -> ToolInvocation {
        ToolInvocation::new(tool, to_payload(json!({"text": text})))
    }

    #[test]
    fn registry_invokes_correct_tool() {
        let registry = ToolRegistry::from_tools([
            Arc::new(UppercaseTool) as Arc<dyn Tool>,
            Arc::new(ReverseTool { name: "reverse" }),
        ])
        .unwrap();

        let upper = registry.invoke(&text_call("uppercase", "agora")).unwrap();
        let reversed = registry.invoke(&text_call("reverse", "agora")).unwrap();
        let missing = registry.invoke(&text_call("nonexistent", "agora"));

        assert_eq!(upper.output["text"], "AGORA");
        assert_eq!(reversed.output["text"], "aroga");
        assert_eq!(missing, Err(ToolError::not_found("nonexistent")));
    }

    #[test]
    fn registry_propagates_tool_errors_unchanged() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(UppercaseTool)).unwrap();

        let call = ToolInvocation::new("uppercase", Default::default());
        let error = registry.invoke(&call).unwrap_err();
        assert_eq!(
            error,
            ToolError::invalid_arguments("uppercase", "missing 'text'")
        );
    }

    #[test]
    fn registry_rejects_duplicates_and_keeps_original() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(ReverseTool { name: "echo" })).unwrap();

        let error = registry
            .register(Arc::new(ReverseTool { name: "echo" }))
            .unwrap_err();
        assert!(matches!(error, ToolError::Duplicate { .. }));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("echo").unwrap().description(), "Reverses text");
    }

    #[test]
    fn registry_overwrite_keeps_registration_slot() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(UppercaseTool)).unwrap();
        registry.register(Arc::new(ReverseTool { name: "reverse" })).unwrap();

        // Replace "uppercase" with a tool that answers to the same name.
        struct LoudTool;
        impl Tool for LoudTool {
            fn name(&self) -> &str {
                "uppercase"
            }
            fn description(&self) -> &str {
                "Louder"
            }
            fn prototype(&self) -> Value {
                json!({})
            }
            fn response_schema(&self) -> Value {
                json!({})
            }
            fn invoke(&self, _invocation: &ToolInvocation) -> ToolResult<ToolResponse> {
                Ok(ToolResponse::success(self.name(), Default::default()))
            }
        }

        registry.register_with(Arc::new(LoudTool), true).unwrap();

        let names: Vec<_> = registry.list_tools().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["uppercase", "reverse"]);
        assert_eq!(registry.get("uppercase").unwrap().description(), "Louder");
    }

    #[test]
    fn registry_rejects_invalid_names() {
        let mut registry = ToolRegistry::new();
        let error = registry
            .register(Arc::new(ReverseTool { name: "bad name" }))
            .unwrap_err();
        assert!(matches!(error, ToolError::InvalidToolId { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_unregister() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(UppercaseTool)).unwrap();

        let removed = registry.unregister("uppercase").unwrap();
        assert_eq!(removed.name(), "uppercase");
        assert!(!registry.contains("uppercase"));
        assert_eq!(
            registry.unregister("uppercase").err(),
            Some(ToolError::not_found("uppercase"))
        );
    }

    #[test]
    fn registry_len_and_is_empty() {
        let empty_registry = ToolRegistry::new();
        assert!(empty_registry.is_empty());
        assert_eq!(empty_registry.len(), 0);
        assert!(empty_registry.get("uppercase").is_err());

        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(UppercaseTool)).unwrap();
        registry.register(Arc::new(ReverseTool { name: "reverse" })).unwrap();

        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 2);
        let ids: Vec<_> = registry.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, ["uppercase", "reverse"]);
        assert_eq!(format!("{registry:?}"), r#"["uppercase", "reverse"]"#);
    }
}
