//! The agentic network orchestrator.

use agora_core::{
    Agent, AgentContext, AgentId, AgentMessage, AgentStepOutput, Environment,
    EnvironmentStepInput, EnvironmentStepResult, EpisodeId, ToolExecutionMode, ToolExecutor,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, info_span};

use crate::config::NetworkConfig;
use crate::episode::{EpisodeEnd, EpisodeSummary};
use crate::error::{EnvironmentPhase, NetworkError, NetworkResult};
use crate::metrics::NetworkMetrics;
use crate::queue::MessageQueue;
use crate::roster::{Member, Roster};

/// Lifecycle state of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkState {
    /// Never reset; `step` is refused
    Uninitialized,
    /// Accepting `step`
    Ready,
    /// The environment ended the episode; only `reset` leaves this state
    Terminated,
}

/// Coordinates a set of agents around one environment.
///
/// Every [`step`](Self::step) runs one tick, always in this order:
///
/// 1. each active agent steps once, in registration order
/// 2. tool calls are resolved according to the [`ToolExecutionMode`]:
///    executed right away and answered to the caller (streaming), or handed
///    to the environment inside its step input (offline)
/// 3. messages from this tick are queued behind any enqueued earlier, and
///    the whole queue is drained
/// 4. the environment steps once
/// 5. in offline mode, tool responses returned by the environment are
///    delivered, then every agent receives its observation
///
/// Agents whose output sets `terminated` are retired: they are no longer
/// stepped until the next reset, but still receive deliveries. Ending the
/// episode is up to the environment.
pub struct AgenticNetwork<E: Environment> {
    environment: E,
    config: NetworkConfig,
    roster: Roster,
    queue: MessageQueue,
    state: NetworkState,
    episode_id: Option<EpisodeId>,
    tick: u64,
    metrics: NetworkMetrics,
}

impl<E: Environment> AgenticNetwork<E> {
    /// Create a network with the default configuration (streaming mode).
    pub fn new(environment: E) -> Self {
        Self::with_config(environment, NetworkConfig::default())
    }

    pub fn with_mode(environment: E, mode: ToolExecutionMode) -> Self {
        Self::with_config(
            environment,
            NetworkConfig {
                tool_execution_mode: mode,
                ..NetworkConfig::default()
            },
        )
    }

    pub fn with_config(environment: E, config: NetworkConfig) -> Self {
        Self {
            environment,
            config,
            roster: Roster::default(),
            queue: MessageQueue::new(),
            state: NetworkState::Uninitialized,
            episode_id: None,
            tick: 0,
            metrics: NetworkMetrics::default(),
        }
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.environment
    }

    /// Consume the network and return the environment.
    pub fn into_environment(self) -> E {
        self.environment
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn mode(&self) -> ToolExecutionMode {
        self.config.tool_execution_mode
    }

    pub fn state(&self) -> NetworkState {
        self.state
    }

    /// Ticks completed in the current episode.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Id of the current episode; `None` until the first reset.
    pub fn episode_id(&self) -> Option<EpisodeId> {
        self.episode_id
    }

    pub fn metrics(&self) -> &NetworkMetrics {
        &self.metrics
    }

    /// Executor bound by the environment, if any.
    pub fn tool_executor(&self) -> Option<Arc<dyn ToolExecutor>> {
        self.environment.tool_executor()
    }

    /// Registered agent ids, in registration order.
    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.roster.ids()
    }

    pub fn contains_agent(&self, id: &AgentId) -> bool {
        self.roster.contains(id)
    }

    pub fn agent(&self, id: &AgentId) -> Option<&dyn Agent> {
        self.roster
            .iter()
            .find(|member| &member.id == id)
            .map(|member| member.agent.as_ref())
    }

    /// Whether the agent asked to stop stepping for the current episode.
    pub fn is_retired(&self, id: &AgentId) -> bool {
        self.roster
            .iter()
            .any(|member| &member.id == id && member.retired)
    }

    pub fn len(&self) -> usize {
        self.roster.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Messages waiting for the next tick's drain.
    pub fn pending_messages(&self) -> usize {
        self.queue.len()
    }

    /// Register an agent.
    ///
    /// The environment validates the roster including the newcomer before
    /// anything is stored; a rejection leaves the network unchanged. The
    /// agent then receives its [`AgentContext`], exactly once.
    pub fn register_agent(&mut self, agent: impl Agent + 'static) -> NetworkResult<()> {
        self.register_boxed(Box::new(agent))
    }

    /// Register an already boxed agent. See [`register_agent`](Self::register_agent).
    pub fn register_boxed(&mut self, agent: Box<dyn Agent>) -> NetworkResult<()> {
        let mut member = Member::new(agent);
        if self.roster.contains(&member.id) {
            return Err(NetworkError::AgentAlreadyRegistered { agent: member.id });
        }

        let roster = self.roster.ids_with(&member.id);
        self.environment
            .validate_agents(&roster)
            .map_err(|source| NetworkError::environment(EnvironmentPhase::ValidateAgents, source))?;

        if member.hooks.context {
            member.agent.attach_context(AgentContext::new(
                member.id.clone(),
                self.mode(),
                self.environment.tool_executor(),
            ));
        }

        info!(agent = %member.id, agents = roster.len(), "Agent registered");
        self.roster.push(member);
        Ok(())
    }

    /// Remove an agent and hand it back.
    ///
    /// Absent ids are ignored. Otherwise the environment validates the
    /// remaining roster first; a rejection keeps the agent registered.
    pub fn unregister_agent(&mut self, id: &AgentId) -> NetworkResult<Option<Box<dyn Agent>>> {
        if !self.roster.contains(id) {
            debug!(agent = %id, "Unregister ignored; agent not registered");
            return Ok(None);
        }

        let remaining = self.roster.ids_without(id);
        self.environment
            .validate_agents(&remaining)
            .map_err(|source| NetworkError::environment(EnvironmentPhase::ValidateAgents, source))?;

        info!(agent = %id, agents = remaining.len(), "Agent unregistered");
        Ok(self.roster.remove(id).map(|member| member.agent))
    }

    /// Queue a message for delivery at the next tick's drain, ahead of the
    /// messages agents produce during that tick. Discarded by `reset`.
    pub fn enqueue_message(&mut self, message: AgentMessage) {
        self.queue.push(message);
    }

    /// Start a new episode.
    ///
    /// Resets every agent and the environment, discards queued messages,
    /// reinstates retired agents and delivers the initial observations.
    pub fn reset(&mut self) -> NetworkResult<EnvironmentStepResult> {
        self.begin_episode().map(|(_, result)| result)
    }

    fn begin_episode(&mut self) -> NetworkResult<(EpisodeId, EnvironmentStepResult)> {
        for member in self.roster.iter_mut() {
            member.agent.reset();
            member.retired = false;
        }

        let result = self
            .environment
            .reset()
            .map_err(|source| NetworkError::environment(EnvironmentPhase::Reset, source))?;

        self.queue.clear();
        let episode_id = EpisodeId::generate();
        self.episode_id = Some(episode_id);
        self.tick = 0;
        self.metrics.record_episode();

        self.dispatch_observations(&result);
        self.state = NetworkState::Ready;

        info!(episode = %episode_id, agents = self.roster.len(), "Network reset");
        Ok((episode_id, result))
    }

    /// Run one tick and return the environment's result unchanged.
    ///
    /// # Errors
    ///
    /// - [`NetworkError::NotReset`] before the first reset
    /// - [`NetworkError::EpisodeTerminated`] once the environment ended the episode
    /// - [`NetworkError::CallerMismatch`] / [`NetworkError::SenderMismatch`]
    ///   when an agent speaks for someone else; raised before any tool runs
    /// - agent, streamed tool and environment failures, which abort the tick
    pub fn step(&mut self) -> NetworkResult<EnvironmentStepResult> {
        let episode_id = match (self.state, self.episode_id) {
            (NetworkState::Ready, Some(episode_id)) => episode_id,
            (NetworkState::Terminated, _) => return Err(NetworkError::EpisodeTerminated),
            _ => return Err(NetworkError::NotReset),
        };

        let tick = self.tick + 1;
        let span = info_span!("tick", episode = %episode_id, tick);
        let _guard = span.enter();

        let mut outputs = self.step_agents()?;
        for (agent_id, output) in &mut outputs {
            stamp_identity(agent_id, output)?;
        }

        if self.mode() == ToolExecutionMode::Streaming {
            self.stream_tool_calls(&outputs)?;
        }

        let mut input = EnvironmentStepInput::new();
        let mut retiring = Vec::new();
        for (agent_id, output) in outputs {
            if self.mode() == ToolExecutionMode::Offline && !output.tool_invocations.is_empty() {
                self.metrics
                    .record_tools_deferred(output.tool_invocations.len());
                input
                    .tool_invocations
                    .insert(agent_id.clone(), output.tool_invocations);
            }
            self.queue.extend(output.broadcast_messages);
            if let Some(actions) = output.environment_actions {
                input.actions.insert(agent_id.clone(), actions);
            }
            if output.terminated {
                retiring.push(agent_id);
            }
        }

        self.drain_messages();

        debug!(
            actions = input.actions.len(),
            deferred_tool_calls = input.pending_tool_calls(),
            "Stepping environment"
        );
        let result = self
            .environment
            .step(input)
            .map_err(|source| NetworkError::environment(EnvironmentPhase::Step, source))?;

        self.dispatch_tool_responses(&result);
        self.dispatch_observations(&result);

        for agent_id in retiring {
            if let Some(member) = self.roster.get_mut(&agent_id)
                && !member.retired
            {
                member.retired = true;
                self.metrics.record_agent_retired();
                info!(agent = %agent_id, "Agent retired for the rest of the episode");
            }
        }

        self.tick = tick;
        self.metrics.record_tick();
        if result.terminated {
            self.state = NetworkState::Terminated;
            info!(episode = %episode_id, ticks = tick, "Episode terminated by environment");
        }

        Ok(result)
    }

    /// Reset, then step until the environment terminates, every agent has
    /// retired, or the configured tick limit is reached.
    pub fn run_episode(&mut self) -> NetworkResult<EpisodeSummary> {
        let (episode_id, mut last_result) = self.begin_episode()?;
        let mut ticks = 0;

        let end = loop {
            if self.roster.is_empty() || self.roster.all_retired() {
                break EpisodeEnd::AgentsRetired;
            }
            if ticks >= self.config.max_episode_ticks {
                break EpisodeEnd::TickLimit;
            }
            last_result = self.step()?;
            ticks += 1;
            if last_result.terminated {
                break EpisodeEnd::EnvironmentTerminated;
            }
        };

        info!(episode = %episode_id, ticks, end = ?end, "Episode finished");
        Ok(EpisodeSummary {
            episode_id,
            ticks,
            end,
            last_result,
        })
    }

    fn step_agents(&mut self) -> NetworkResult<Vec<(AgentId, AgentStepOutput)>> {
        let mut outputs = Vec::with_capacity(self.roster.len());
        for member in self.roster.iter_mut() {
            if member.retired {
                continue;
            }
            let output = member.agent.step().map_err(|source| NetworkError::Agent {
                agent: member.id.clone(),
                source,
            })?;
            outputs.push((member.id.clone(), output));
        }
        Ok(outputs)
    }

    fn stream_tool_calls(&mut self, outputs: &[(AgentId, AgentStepOutput)]) -> NetworkResult<()> {
        let pending: usize = outputs
            .iter()
            .map(|(_, output)| output.tool_invocations.len())
            .sum();
        if pending == 0 {
            return Ok(());
        }

        let Some(executor) = self.environment.tool_executor() else {
            debug!(skipped = pending, "No tool executor bound; skipping tool calls");
            self.metrics.record_tools_skipped(pending);
            return Ok(());
        };

        for (agent_id, output) in outputs {
            for invocation in &output.tool_invocations {
                let response =
                    executor
                        .execute(invocation)
                        .map_err(|source| NetworkError::Tool {
                            agent: agent_id.clone(),
                            source,
                        })?;
                self.metrics.record_tool_executed();

                if let Some(member) = self.roster.get_mut(agent_id)
                    && member.deliver_tool_result(&response)
                {
                    self.metrics.record_tool_response();
                }
            }
        }
        Ok(())
    }

    fn drain_messages(&mut self) {
        for message in self.queue.take_all() {
            match &message.recipient {
                Some(recipient) => match self.roster.get_mut(recipient) {
                    Some(member) => {
                        if member.deliver_message(&message) {
                            self.metrics.record_message_delivered();
                        }
                    }
                    None => {
                        debug!(
                            sender = %message.sender,
                            recipient = %recipient,
                            "Dropping message for unregistered agent"
                        );
                        self.metrics.record_message_dropped();
                    }
                },
                None => {
                    for member in self.roster.iter_mut() {
                        if member.id != message.sender && member.deliver_message(&message) {
                            self.metrics.record_message_delivered();
                        }
                    }
                }
            }
        }
    }

    fn dispatch_tool_responses(&mut self, result: &EnvironmentStepResult) {
        let Some(tool_responses) = &result.tool_responses else {
            return;
        };

        if self.mode() == ToolExecutionMode::Streaming {
            if !tool_responses.is_empty() {
                debug!(
                    agents = tool_responses.len(),
                    "Ignoring tool responses returned in streaming mode"
                );
            }
            return;
        }

        for member in self.roster.iter_mut() {
            let Some(responses) = tool_responses.get(&member.id) else {
                continue;
            };
            for response in responses {
                if member.deliver_tool_result(response) {
                    self.metrics.record_tool_response();
                }
            }
        }

        for agent_id in tool_responses.keys() {
            if !self.roster.contains(agent_id) {
                debug!(agent = %agent_id, "Dropping tool responses for unregistered agent");
            }
        }
    }

    fn dispatch_observations(&mut self, result: &EnvironmentStepResult) {
        for member in self.roster.iter_mut() {
            if let Some(observation) = result.observations.get(&member.id) {
                member.deliver_observation(observation);
                self.metrics.record_observation_delivered();
            }
        }

        for agent_id in result.observations.keys() {
            if !self.roster.contains(agent_id) {
                debug!(agent = %agent_id, "Dropping observation for unregistered agent");
                self.metrics.record_observation_dropped();
            }
        }
    }
}

/// Fill in missing caller/sender ids and reject outputs that speak for
/// another agent.
fn stamp_identity(agent_id: &AgentId, output: &mut AgentStepOutput) -> NetworkResult<()> {
    for invocation in &mut output.tool_invocations {
        match &invocation.caller {
            None => invocation.caller = Some(agent_id.clone()),
            Some(caller) if caller == agent_id => {}
            Some(caller) => {
                return Err(NetworkError::CallerMismatch {
                    agent: agent_id.clone(),
                    caller: caller.clone(),
                });
            }
        }
    }

    if let Some(message) = output
        .broadcast_messages
        .iter()
        .find(|message| &message.sender != agent_id)
    {
        return Err(NetworkError::SenderMismatch {
            agent: agent_id.clone(),
            sender: message.sender.clone(),
        });
    }
    Ok(())
}

impl<E: Environment> fmt::Debug for AgenticNetwork<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgenticNetwork")
            .field("agents", &self.roster.ids())
            .field("mode", &self.mode())
            .field("state", &self.state)
            .field("episode_id", &self.episode_id)
            .field("tick", &self.tick)
            .field("pending_messages", &self.queue.len())
            .finish_non_exhaustive()
    }
}
