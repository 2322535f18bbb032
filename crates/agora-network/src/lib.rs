//! # Agora Network
//!
//! The orchestration core: an [`AgenticNetwork`] owns a set of agents and one
//! environment and drives them tick by tick. Tool calls are resolved under
//! one of two disciplines chosen at construction:
//!
//! - **Streaming**: the network executes every call through the
//!   environment's [`ToolExecutor`](agora_core::ToolExecutor) and answers the
//!   calling agent before the environment steps. The environment never sees
//!   the calls.
//! - **Offline**: calls are handed to the environment in its step input; the
//!   environment decides whether to run them and returns the responses,
//!   which the network delivers before observations.
//!
//! Message and observation delivery is identical in both modes.
//!
//! ```rust
//! use agora_core::{
//!     Agent, AgentId, AgentObservation, AgentResult, AgentStepOutput, Environment,
//!     EnvironmentResult, EnvironmentStepInput, EnvironmentStepResult, to_payload,
//! };
//! use agora_network::{AgenticNetwork, NetworkState};
//! use serde_json::json;
//!
//! struct Clock {
//!     now: u64,
//! }
//!
//! impl Environment for Clock {
//!     fn reset(&mut self) -> EnvironmentResult<EnvironmentStepResult> {
//!         self.now = 0;
//!         Ok(EnvironmentStepResult::new())
//!     }
//!
//!     fn step(
//!         &mut self,
//!         input: EnvironmentStepInput,
//!     ) -> EnvironmentResult<EnvironmentStepResult> {
//!         self.now += 1;
//!         let mut result = EnvironmentStepResult::new();
//!         for agent in input.actions.into_keys() {
//!             let now = to_payload(json!({"now": self.now}));
//!             let observation = AgentObservation::new("clock", now);
//!             result = result.with_observation(agent, observation);
//!         }
//!         if self.now == 3 {
//!             result = result.terminated();
//!         }
//!         Ok(result)
//!     }
//! }
//!
//! struct Watcher {
//!     id: AgentId,
//!     last_seen: Option<u64>,
//! }
//!
//! impl Agent for Watcher {
//!     fn id(&self) -> &AgentId {
//!         &self.id
//!     }
//!
//!     fn handle_observation(&mut self, observation: &AgentObservation) {
//!         self.last_seen = observation.get("now").and_then(|v| v.as_u64());
//!     }
//!
//!     fn step(&mut self) -> AgentResult<AgentStepOutput> {
//!         Ok(AgentStepOutput::empty().with_environment_actions(to_payload(json!({"tick": true}))))
//!     }
//! }
//!
//! let mut network = AgenticNetwork::new(Clock { now: 0 });
//! network
//!     .register_agent(Watcher { id: AgentId::parse("watcher").unwrap(), last_seen: None })
//!     .unwrap();
//!
//! let summary = network.run_episode().unwrap();
//! assert_eq!(summary.ticks, 3);
//! assert_eq!(network.state(), NetworkState::Terminated);
//! assert!(network.step().is_err());
//! ```

pub mod config;
pub mod episode;
pub mod error;
pub mod metrics;
pub mod network;
pub mod queue;
mod roster;

pub use config::{ConfigError, NetworkConfig, NetworkConfigBuilder};
pub use episode::{EpisodeEnd, EpisodeSummary};
pub use error::{EnvironmentPhase, NetworkError, NetworkResult};
pub use metrics::NetworkMetrics;
pub use network::{AgenticNetwork, NetworkState};
pub use queue::MessageQueue;
