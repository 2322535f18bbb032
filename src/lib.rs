//! # Agora
//!
//! Agora is an in-process orchestration core for multi-agent systems. A set of
//! agents and one environment are driven in discrete ticks; agents may call
//! tools, message each other and act on the environment.
//!
//! ## Core Components
//!
//! - **[Agent]**: steps once per tick and receives observations, messages and
//!   tool results
//! - **[Environment]**: validates the roster, resets, steps on the agents'
//!   actions and may bind a [`ToolExecutor`]
//! - **[Tool]**, **[ToolRegistry]**, **[DefaultToolExecutor]**: named,
//!   schema-described capabilities and the default way of running them
//! - **[AgenticNetwork]**: the orchestrator, in streaming or offline
//!   [`ToolExecutionMode`]
//!
//! ## Quick Start
//!
//! ```rust
//! use agora::prelude::*;
//! use serde_json::json;
//!
//! struct Lamp {
//!     on: bool,
//!     roster: Vec<AgentId>,
//! }
//!
//! impl Environment for Lamp {
//!     fn reset(&mut self) -> EnvironmentResult<EnvironmentStepResult> {
//!         self.on = false;
//!         Ok(EnvironmentStepResult::new())
//!     }
//!
//!     fn step(
//!         &mut self,
//!         input: EnvironmentStepInput,
//!     ) -> EnvironmentResult<EnvironmentStepResult> {
//!         if input.actions.values().any(|action| action.contains_key("toggle")) {
//!             self.on = !self.on;
//!         }
//!         let mut result = EnvironmentStepResult::new();
//!         for agent in &self.roster {
//!             let observation = AgentObservation::new("lamp", to_payload(json!({"on": self.on})));
//!             result = result.with_observation(agent.clone(), observation);
//!         }
//!         Ok(result)
//!     }
//!
//!     fn validate_agents(&mut self, agents: &[AgentId]) -> EnvironmentResult<()> {
//!         self.roster = agents.to_vec();
//!         Ok(())
//!     }
//! }
//!
//! struct Toggler {
//!     id: AgentId,
//!     lamp_on: bool,
//! }
//!
//! impl Agent for Toggler {
//!     fn id(&self) -> &AgentId {
//!         &self.id
//!     }
//!
//!     fn handle_observation(&mut self, observation: &AgentObservation) {
//!         self.lamp_on = observation.get("on") == Some(&json!(true));
//!     }
//!
//!     fn step(&mut self) -> AgentResult<AgentStepOutput> {
//!         let toggle = to_payload(json!({"toggle": true}));
//!         Ok(AgentStepOutput::empty().with_environment_actions(toggle))
//!     }
//! }
//!
//! let mut network = AgenticNetwork::new(Lamp { on: false, roster: Vec::new() });
//! network
//!     .register_agent(Toggler { id: AgentId::parse("toggler").unwrap(), lamp_on: false })
//!     .unwrap();
//!
//! network.reset().unwrap();
//! let result = network.step().unwrap();
//! let toggler = AgentId::parse("toggler").unwrap();
//! assert_eq!(result.observations[&toggler].get("on"), Some(&json!(true)));
//! ```

// ============================================================================
// Module aliases for namespaced access
// ============================================================================

pub use agora_core as core;
pub use agora_network as network;
pub use agora_tools as tools;

// ============================================================================
// Contracts and records
// ============================================================================

pub use agora_core::{
    Agent, AgentContext, AgentHooks, AgentMessage, AgentObservation, AgentStepOutput, Environment,
    EnvironmentStepInput, EnvironmentStepResult, Payload, Tool, ToolExecutionMode, ToolExecutor,
    ToolInvocation, ToolMetadata, ToolResponse, to_payload,
};

// LLM contract
pub use agora_core::{ChatRole, LlmClient, LlmMessage, LlmResult, LlmStream, LlmStreamChunk};

// Identifiers
pub use agora_core::{AgentId, EpisodeId, IdValidationError, ToolId};

// Errors
pub use agora_core::{
    AgentError, AgentResult, EnvironmentError, EnvironmentResult, LlmError, ToolError, ToolResult,
};

// ============================================================================
// Tools
// ============================================================================

pub use agora_tools::{DefaultToolExecutor, RegisteredTool, ToolRegistry};

// ============================================================================
// Orchestration
// ============================================================================

pub use agora_network::{
    AgenticNetwork, ConfigError, EnvironmentPhase, EpisodeEnd, EpisodeSummary, NetworkConfig,
    NetworkConfigBuilder, NetworkError, NetworkMetrics, NetworkResult, NetworkState,
};

/// Everything needed to implement agents and environments and run a network.
pub mod prelude {
    pub use crate::{
        Agent, AgentContext, AgentError, AgentId, AgentMessage, AgentObservation, AgentResult,
        AgentStepOutput, AgenticNetwork, DefaultToolExecutor, Environment, EnvironmentError,
        EnvironmentResult, EnvironmentStepInput, EnvironmentStepResult, NetworkConfig,
        NetworkError, Payload, Tool, ToolError, ToolExecutionMode, ToolExecutor, ToolInvocation,
        ToolRegistry, ToolResponse, ToolResult, to_payload,
    };
}
