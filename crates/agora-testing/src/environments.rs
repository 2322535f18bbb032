//! # Recording Environment
//!
//! A configurable [`Environment`] that keeps every step input it receives,
//! so tests can check exactly what the network handed over.

use agora_core::{
    AgentId, AgentObservation, Environment, EnvironmentError, EnvironmentResult,
    EnvironmentStepInput, EnvironmentStepResult, Payload, ToolExecutor, ToolResponse, to_payload,
};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::events::{Event, EventLog};

/// Source name on every observation this environment produces.
pub const OBSERVATION_SOURCE: &str = "environment";

/// Environment that observes every validated agent each step and records
/// its inputs.
///
/// Observations carry `{"step": n, "action": <the agent's action or null>}`.
#[derive(Default)]
pub struct RecordingEnvironment {
    executor: Option<Arc<dyn ToolExecutor>>,
    execute_deferred: bool,
    terminate_after: Option<u64>,
    max_agents: Option<usize>,
    step_failure: Option<EnvironmentError>,
    reset_failure: Option<EnvironmentError>,
    extra_tool_responses: BTreeMap<AgentId, Vec<ToolResponse>>,
    roster: Vec<AgentId>,
    inputs: Vec<EnvironmentStepInput>,
    steps: u64,
    resets: u64,
    log: Option<EventLog>,
}

impl RecordingEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind an executor: used by the network in streaming mode and by this
    /// environment for deferred calls.
    pub fn with_executor(mut self, executor: Arc<dyn ToolExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Run deferred tool calls through the bound executor and return the
    /// responses. Raised tool errors become failure responses.
    pub fn executing_deferred_calls(mut self) -> Self {
        self.execute_deferred = true;
        self
    }

    /// Report `terminated` on the given step.
    pub fn terminate_after(mut self, steps: u64) -> Self {
        self.terminate_after = Some(steps);
        self
    }

    /// Reject rosters larger than `max`.
    pub fn max_agents(mut self, max: usize) -> Self {
        self.max_agents = Some(max);
        self
    }

    /// Fail every step with this error.
    pub fn failing_step(mut self, error: EnvironmentError) -> Self {
        self.step_failure = Some(error);
        self
    }

    /// Fail every reset with this error.
    pub fn failing_reset(mut self, error: EnvironmentError) -> Self {
        self.reset_failure = Some(error);
        self
    }

    /// Include this response in every step result, whatever the input.
    pub fn with_tool_response(mut self, agent: AgentId, response: ToolResponse) -> Self {
        self.extra_tool_responses
            .entry(agent)
            .or_default()
            .push(response);
        self
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Every step input received, oldest first.
    pub fn inputs(&self) -> &[EnvironmentStepInput] {
        &self.inputs
    }

    pub fn last_input(&self) -> Option<&EnvironmentStepInput> {
        self.inputs.last()
    }

    /// Roster from the last accepted validation.
    pub fn roster(&self) -> &[AgentId] {
        &self.roster
    }

    /// Steps taken since the last reset.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn resets(&self) -> u64 {
        self.resets
    }

    fn observation(&self, action: Option<&Payload>) -> AgentObservation {
        let action = action.cloned().map(Value::Object).unwrap_or(Value::Null);
        AgentObservation::new(
            OBSERVATION_SOURCE,
            to_payload(json!({"step": self.steps, "action": action})),
        )
    }

    fn run_deferred(
        &self,
        input: &EnvironmentStepInput,
    ) -> Option<BTreeMap<AgentId, Vec<ToolResponse>>> {
        let executor = self.executor.as_ref().filter(|_| self.execute_deferred)?;
        let responses = input
            .tool_invocations
            .iter()
            .map(|(agent, invocations)| {
                let responses = invocations
                    .iter()
                    .map(|invocation| {
                        executor.execute(invocation).unwrap_or_else(|error| {
                            ToolResponse::failure(&invocation.tool_name, error.to_string())
                        })
                    })
                    .collect::<Vec<_>>();
                (agent.clone(), responses)
            })
            .collect();
        Some(responses)
    }

    fn record(&self, event: Event) {
        if let Some(log) = &self.log {
            log.record(event);
        }
    }
}

impl Environment for RecordingEnvironment {
    fn reset(&mut self) -> EnvironmentResult<EnvironmentStepResult> {
        self.record(Event::EnvironmentReset);
        if let Some(error) = &self.reset_failure {
            return Err(error.clone());
        }
        self.steps = 0;
        self.resets += 1;

        let mut result = EnvironmentStepResult::new();
        for agent in &self.roster {
            result = result.with_observation(agent.clone(), self.observation(None));
        }
        Ok(result)
    }

    fn step(&mut self, input: EnvironmentStepInput) -> EnvironmentResult<EnvironmentStepResult> {
        self.record(Event::EnvironmentStepped);
        if let Some(error) = &self.step_failure {
            return Err(error.clone());
        }

        self.steps += 1;
        let mut result = EnvironmentStepResult::new();
        for agent in &self.roster {
            let observation = self.observation(input.actions.get(agent));
            result = result.with_observation(agent.clone(), observation);
        }

        let mut tool_responses = self.run_deferred(&input);
        for (agent, responses) in &self.extra_tool_responses {
            tool_responses
                .get_or_insert_with(BTreeMap::new)
                .entry(agent.clone())
                .or_default()
                .extend(responses.iter().cloned());
        }
        result.tool_responses = tool_responses;

        if self.terminate_after == Some(self.steps) {
            result = result.terminated();
        }

        self.inputs.push(input);
        Ok(result)
    }

    fn validate_agents(&mut self, agents: &[AgentId]) -> EnvironmentResult<()> {
        if let Some(max) = self.max_agents
            && agents.len() > max
        {
            return Err(EnvironmentError::roster_rejected(format!(
                "at most {max} agents allowed, got {}",
                agents.len()
            )));
        }
        self.roster = agents.to_vec();
        Ok(())
    }

    fn tool_executor(&self) -> Option<Arc<dyn ToolExecutor>> {
        self.executor.clone()
    }
}

impl fmt::Debug for RecordingEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordingEnvironment")
            .field("executor", &self.executor.is_some())
            .field("execute_deferred", &self.execute_deferred)
            .field("roster", &self.roster)
            .field("steps", &self.steps)
            .field("inputs", &self.inputs.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::agent_id;
    use crate::mock_tools::doubling_executor;
    use agora_core::ToolInvocation;

    #[test]
    fn observes_every_validated_agent() {
        let mut env = RecordingEnvironment::new();
        env.validate_agents(&[agent_id("a"), agent_id("b")]).unwrap();

        let reset = env.reset().unwrap();
        assert_eq!(reset.observations.len(), 2);

        let input =
            EnvironmentStepInput::new().with_action(agent_id("a"), to_payload(json!({"x": 1})));
        let result = env.step(input).unwrap();
        assert_eq!(result.observations[&agent_id("a")].get("action"), Some(&json!({"x": 1})));
        assert_eq!(result.observations[&agent_id("b")].get("action"), Some(&Value::Null));
        assert_eq!(env.inputs().len(), 1);
    }

    #[test]
    fn executes_deferred_calls_when_asked() {
        let mut env = RecordingEnvironment::new()
            .with_executor(doubling_executor())
            .executing_deferred_calls();
        env.validate_agents(&[agent_id("a")]).unwrap();

        let input = EnvironmentStepInput::new().with_tool_invocations(
            agent_id("a"),
            vec![
                ToolInvocation::new("double", to_payload(json!({"value": 5}))),
                ToolInvocation::new("missing", Payload::new()),
            ],
        );
        let result = env.step(input).unwrap();
        let tool_responses = result.tool_responses.unwrap();
        let responses = &tool_responses[&agent_id("a")];
        assert_eq!(responses[0].output["result"], json!(10));
        assert!(responses[1].is_failure());
    }

    #[test]
    fn ignores_deferred_calls_by_default() {
        let mut env = RecordingEnvironment::new().with_executor(doubling_executor());
        let input = EnvironmentStepInput::new().with_tool_invocations(
            agent_id("a"),
            vec![ToolInvocation::new("double", to_payload(json!({"value": 5})))],
        );
        assert!(env.step(input).unwrap().tool_responses.is_none());
    }

    #[test]
    fn rejects_oversized_roster() {
        let mut env = RecordingEnvironment::new().max_agents(1);
        assert!(env.validate_agents(&[agent_id("a")]).is_ok());
        assert!(env.validate_agents(&[agent_id("a"), agent_id("b")]).is_err());
        assert_eq!(env.roster(), [agent_id("a")]);
    }

    #[test]
    fn terminates_on_requested_step() {
        let mut env = RecordingEnvironment::new().terminate_after(2);
        assert!(!env.step(EnvironmentStepInput::new()).unwrap().terminated);
        assert!(env.step(EnvironmentStepInput::new()).unwrap().terminated);
    }
}
