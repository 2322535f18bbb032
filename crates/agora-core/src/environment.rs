//! # Environment Contract
//!
//! The environment owns shared world state and is the only authority over
//! episode termination. The network steps it exactly once per tick.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::EnvironmentResult;
use crate::identifiers::AgentId;
use crate::message::{AgentObservation, Payload};
use crate::tool::{ToolExecutor, ToolInvocation, ToolResponse};

/// What the network hands to [`Environment::step`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentStepInput {
    /// Per-agent actions; agents without an action are absent
    #[serde(default)]
    pub actions: BTreeMap<AgentId, Payload>,
    /// Per-agent deferred tool calls; always empty in streaming mode
    #[serde(default)]
    pub tool_invocations: BTreeMap<AgentId, Vec<ToolInvocation>>,
}

impl EnvironmentStepInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_action(mut self, agent: AgentId, action: Payload) -> Self {
        self.actions.insert(agent, action);
        self
    }

    pub fn with_tool_invocations(
        mut self,
        agent: AgentId,
        invocations: Vec<ToolInvocation>,
    ) -> Self {
        self.tool_invocations.insert(agent, invocations);
        self
    }

    /// Total number of deferred tool calls across all agents.
    pub fn pending_tool_calls(&self) -> usize {
        self.tool_invocations.values().map(Vec::len).sum()
    }
}

/// What [`Environment::reset`] and [`Environment::step`] return.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentStepResult {
    /// Fresh observation per agent
    #[serde(default)]
    pub observations: BTreeMap<AgentId, AgentObservation>,
    /// Whether the episode is over
    #[serde(default)]
    pub terminated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewards: Option<BTreeMap<AgentId, f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Payload>,
    /// Responses to deferred tool calls the environment chose to execute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_responses: Option<BTreeMap<AgentId, Vec<ToolResponse>>>,
}

impl EnvironmentStepResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_observation(mut self, agent: AgentId, observation: AgentObservation) -> Self {
        self.observations.insert(agent, observation);
        self
    }

    pub fn with_reward(mut self, agent: AgentId, reward: f64) -> Self {
        self.rewards.get_or_insert_with(BTreeMap::new).insert(agent, reward);
        self
    }

    pub fn with_info(mut self, info: Payload) -> Self {
        self.info = Some(info);
        self
    }

    pub fn with_tool_responses(mut self, agent: AgentId, responses: Vec<ToolResponse>) -> Self {
        self.tool_responses
            .get_or_insert_with(BTreeMap::new)
            .insert(agent, responses);
        self
    }

    pub fn terminated(mut self) -> Self {
        self.terminated = true;
        self
    }
}

/// Shared world state advanced by the network.
pub trait Environment {
    /// Re-initialize world state and return the first observation set.
    fn reset(&mut self) -> EnvironmentResult<EnvironmentStepResult>;

    /// Apply per-agent actions (and, in offline mode, pending tool calls)
    /// and advance world state once.
    fn step(&mut self, input: EnvironmentStepInput) -> EnvironmentResult<EnvironmentStepResult>;

    /// Called whenever agent membership changes, with the full roster in
    /// registration order. Rejecting leaves the membership unchanged.
    fn validate_agents(&mut self, _agents: &[AgentId]) -> EnvironmentResult<()> {
        Ok(())
    }

    /// Executor the network uses in streaming mode and advertises to agents.
    fn tool_executor(&self) -> Option<Arc<dyn ToolExecutor>> {
        None
    }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn reset(&mut self) -> EnvironmentResult<EnvironmentStepResult> {
        (**self).reset()
    }

    fn step(&mut self, input: EnvironmentStepInput) -> EnvironmentResult<EnvironmentStepResult> {
        (**self).step(input)
    }

    fn validate_agents(&mut self, agents: &[AgentId]) -> EnvironmentResult<()> {
        (**self).validate_agents(agents)
    }

    fn tool_executor(&self) -> Option<Arc<dyn ToolExecutor>> {
        (**self).tool_executor()
    }
}
