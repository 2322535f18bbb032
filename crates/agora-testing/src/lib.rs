//! # Agora Testing
//!
//! Fixtures for exercising agents, tools and environments without writing
//! throwaway implementations in every test.
//!
//! ## Components
//!
//! - **Mock Tools**: [`DoublingTool`], [`MockTool`] and executors over them
//! - **Scripted Agents**: [`ScriptedAgent`] plus an [`AgentProbe`] to inspect
//!   deliveries after the agent was moved into a network
//! - **Recording Environment**: [`RecordingEnvironment`] keeps every step
//!   input and can execute deferred tool calls
//! - **Event Log**: [`EventLog`] orders deliveries across agents and the
//!   environment
//! - **Scripted LLM**: [`ScriptedLlmClient`]
//!
//! ## Usage
//!
//! ```rust
//! use agora_core::{AgentStepOutput, Environment, ToolInvocation, to_payload};
//! use agora_testing::{RecordingEnvironment, ScriptedAgent, agent_id, doubling_executor};
//! use serde_json::json;
//!
//! let agent = ScriptedAgent::new(agent_id("agent-1")).then(
//!     AgentStepOutput::empty()
//!         .with_tool_invocation(ToolInvocation::new("double", to_payload(json!({"value": 5})))),
//! );
//! let probe = agent.probe();
//!
//! let env = RecordingEnvironment::new().with_executor(doubling_executor());
//! assert!(env.tool_executor().is_some());
//! assert_eq!(probe.steps(), 0);
//! # drop(agent);
//! ```

/// Scripted agents and probes
pub mod agents;
/// Recording environment
pub mod environments;
/// Ordered event log shared between fixtures
pub mod events;
/// Scripted LLM client
pub mod llm;
/// Mock tools for predictable testing
pub mod mock_tools;

pub use agents::{AgentProbe, AgentRecord, ScriptedAgent, agent_id};
pub use environments::{OBSERVATION_SOURCE, RecordingEnvironment};
pub use events::{Event, EventLog};
pub use llm::ScriptedLlmClient;
pub use mock_tools::{DoublingTool, MockTool, doubling_executor, executor_with};
