use agora_core::{ToolExecutor, ToolInvocation, ToolMetadata, ToolResponse, ToolResult};
use std::sync::Arc;
use tracing::debug;

use crate::registry::ToolRegistry;

/// Executor that runs invocations directly against a [`ToolRegistry`].
#[derive(Debug, Clone)]
pub struct DefaultToolExecutor {
    registry: Arc<ToolRegistry>,
}

impl DefaultToolExecutor {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// The registry invocations are resolved against.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}

impl From<ToolRegistry> for DefaultToolExecutor {
    fn from(registry: ToolRegistry) -> Self {
        Self::new(Arc::new(registry))
    }
}

impl ToolExecutor for DefaultToolExecutor {
    fn execute(&self, invocation: &ToolInvocation) -> ToolResult<ToolResponse> {
        debug!(
            tool = %invocation.tool_name,
            caller = invocation.caller.as_ref().map(|caller| caller.as_str()),
            "Executing tool"
        );
        self.registry.invoke(invocation)
    }

    fn list_tools(&self) -> Vec<ToolMetadata> {
        self.registry.list_tools()
    }
}
