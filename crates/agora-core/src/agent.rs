//! # Agent Contract
//!
//! Agents own private decision state. Each tick the network asks every
//! active agent to [`step`](Agent::step) once, then feeds back tool results,
//! messages from peers and fresh observations.
//!
//! Only observation handling and stepping are required. The remaining hooks
//! default to no-ops, and an agent declares through [`Agent::hooks`] which of
//! them it actually wants; the network reads that declaration once at
//! registration and never calls an undeclared hook.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::AgentResult;
use crate::identifiers::AgentId;
use crate::llm::LlmMessage;
use crate::message::{AgentMessage, AgentObservation, Payload};
use crate::mode::ToolExecutionMode;
use crate::tool::{ToolExecutor, ToolInvocation, ToolMetadata, ToolResponse};

/// Everything an agent produces in a single tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentStepOutput {
    /// Chat-style messages the agent emitted (e.g. model answers)
    #[serde(default)]
    pub responses: Vec<LlmMessage>,
    /// Tool calls to resolve this tick
    #[serde(default)]
    pub tool_invocations: Vec<ToolInvocation>,
    /// Messages for peers, direct or broadcast
    #[serde(default)]
    pub broadcast_messages: Vec<AgentMessage>,
    /// Agent asks to stop being stepped for the rest of the episode
    #[serde(default)]
    pub terminated: bool,
    /// Action handed to the environment; absent agents are left out of the
    /// step input
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_actions: Option<Payload>,
}

impl AgentStepOutput {
    /// The neutral output: no responses, calls, messages or action.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, response: LlmMessage) -> Self {
        self.responses.push(response);
        self
    }

    pub fn with_tool_invocation(mut self, invocation: ToolInvocation) -> Self {
        self.tool_invocations.push(invocation);
        self
    }

    pub fn with_message(mut self, message: AgentMessage) -> Self {
        self.broadcast_messages.push(message);
        self
    }

    pub fn with_environment_actions(mut self, actions: Payload) -> Self {
        self.environment_actions = Some(actions);
        self
    }

    pub fn terminated(mut self) -> Self {
        self.terminated = true;
        self
    }

    /// Whether the output asks nothing of the network.
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
            && self.tool_invocations.is_empty()
            && self.broadcast_messages.is_empty()
            && self.environment_actions.is_none()
            && !self.terminated
    }
}

/// Optional hooks an agent wants the network to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentHooks {
    /// Receive an [`AgentContext`] at registration
    pub context: bool,
    /// Receive messages from peers
    pub messages: bool,
    /// Receive tool responses
    pub tool_results: bool,
}

impl AgentHooks {
    pub const ALL: AgentHooks = AgentHooks {
        context: true,
        messages: true,
        tool_results: true,
    };

    pub const NONE: AgentHooks = AgentHooks {
        context: false,
        messages: false,
        tool_results: false,
    };
}

impl Default for AgentHooks {
    fn default() -> Self {
        Self::ALL
    }
}

/// Handed to an agent exactly once, when it joins a network.
///
/// Holds the executor handle and tool catalogue by value, never a reference
/// back to the network or environment, so agents cannot alias state the
/// orchestrator owns.
#[derive(Clone)]
pub struct AgentContext {
    /// Id the agent was registered under
    pub agent_id: AgentId,
    /// How the network resolves this agent's tool calls
    pub tool_execution_mode: ToolExecutionMode,
    /// Executor bound by the environment, if any
    pub tool_executor: Option<Arc<dyn ToolExecutor>>,
    /// Tools the executor advertises
    pub tools: Vec<ToolMetadata>,
    pub metadata: Payload,
}

impl AgentContext {
    /// Build a context, discovering the tool catalogue from the executor.
    pub fn new(
        agent_id: AgentId,
        tool_execution_mode: ToolExecutionMode,
        tool_executor: Option<Arc<dyn ToolExecutor>>,
    ) -> Self {
        let tools = tool_executor
            .as_ref()
            .map(|executor| executor.list_tools())
            .unwrap_or_default();
        Self {
            agent_id,
            tool_execution_mode,
            tool_executor,
            tools,
            metadata: Payload::new(),
        }
    }

    pub fn with_metadata(mut self, metadata: Payload) -> Self {
        self.metadata = metadata;
        self
    }

    /// Whether a tool with this name was advertised.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.iter().any(|tool| tool.name == name)
    }
}

impl fmt::Debug for AgentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentContext")
            .field("agent_id", &self.agent_id)
            .field("tool_execution_mode", &self.tool_execution_mode)
            .field("tool_executor", &self.tool_executor.is_some())
            .field("tools", &self.tools)
            .field("metadata", &self.metadata)
            .finish()
    }
}

/// An autonomous participant in an agentic network.
///
/// # Example
///
/// ```rust
/// use agora_core::agent::{Agent, AgentStepOutput};
/// use agora_core::{AgentId, AgentObservation, AgentResult, to_payload};
/// use serde_json::json;
///
/// struct CountingAgent {
///     id: AgentId,
///     seen: usize,
/// }
///
/// impl Agent for CountingAgent {
///     fn id(&self) -> &AgentId {
///         &self.id
///     }
///
///     fn handle_observation(&mut self, _observation: &AgentObservation) {
///         self.seen += 1;
///     }
///
///     fn step(&mut self) -> AgentResult<AgentStepOutput> {
///         Ok(AgentStepOutput::empty()
///             .with_environment_actions(to_payload(json!({"seen": self.seen}))))
///     }
///
///     fn reset(&mut self) {
///         self.seen = 0;
///     }
/// }
///
/// let mut agent = CountingAgent { id: AgentId::parse("counter").unwrap(), seen: 0 };
/// let output = agent.step().unwrap();
/// assert_eq!(output.environment_actions.unwrap()["seen"], json!(0));
/// ```
pub trait Agent: Send {
    /// Unique id of the agent within a network.
    fn id(&self) -> &AgentId;

    /// Fold an observation into private state.
    fn handle_observation(&mut self, observation: &AgentObservation);

    /// Produce this tick's output.
    ///
    /// Must succeed with a neutral output when nothing has been observed yet.
    fn step(&mut self) -> AgentResult<AgentStepOutput>;

    /// Optional hooks the network should call. Read once at registration.
    fn hooks(&self) -> AgentHooks {
        AgentHooks::ALL
    }

    /// Receive the registration context.
    fn attach_context(&mut self, _context: AgentContext) {}

    /// Restore the pre-episode state. Must be idempotent.
    fn reset(&mut self) {}

    /// Receive a message from a peer.
    fn handle_message(&mut self, _message: &AgentMessage) {}

    /// Receive the response to one of this agent's tool calls.
    fn handle_tool_result(&mut self, _response: &ToolResponse) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolResult;
    use crate::message::to_payload;
    use serde_json::json;

    struct CatalogueExecutor;

    impl ToolExecutor for CatalogueExecutor {
        fn execute(&self, invocation: &ToolInvocation) -> ToolResult<ToolResponse> {
            Ok(ToolResponse::success(&invocation.tool_name, Payload::new()))
        }

        fn list_tools(&self) -> Vec<ToolMetadata> {
            vec![ToolMetadata {
                name: "double".to_string(),
                description: "Doubles a value".to_string(),
                prototype: json!({}),
                response_schema: json!({}),
            }]
        }
    }

    #[test]
    fn test_empty_output_is_neutral() {
        let output = AgentStepOutput::empty();
        assert!(output.is_empty());
        assert!(!output.terminated);
        assert!(output.environment_actions.is_none());
    }

    #[test]
    fn test_output_builders() {
        let sender = AgentId::parse("a").unwrap();
        let output = AgentStepOutput::empty()
            .with_tool_invocation(ToolInvocation::new("double", to_payload(json!({"value": 5}))))
            .with_message(AgentMessage::broadcast(sender, "hello"))
            .with_environment_actions(to_payload(json!({"message": "hi"})))
            .terminated();

        assert_eq!(output.tool_invocations.len(), 1);
        assert_eq!(output.broadcast_messages.len(), 1);
        assert!(output.terminated);
        assert!(!output.is_empty());
    }

    #[test]
    fn test_context_discovers_tools() {
        let id = AgentId::parse("agent-1").unwrap();
        let context = AgentContext::new(
            id.clone(),
            ToolExecutionMode::Offline,
            Some(Arc::new(CatalogueExecutor)),
        );
        assert_eq!(context.agent_id, id);
        assert!(context.has_tool("double"));
        assert!(!context.has_tool("triple"));

        let bare = AgentContext::new(id, ToolExecutionMode::Streaming, None);
        assert!(bare.tools.is_empty());
        assert!(format!("{bare:?}").contains("tool_executor: false"));
    }

    #[test]
    fn test_default_hooks_are_all() {
        assert_eq!(AgentHooks::default(), AgentHooks::ALL);
        assert!(!AgentHooks::NONE.messages);
    }
}
