//! Environment that reflects each agent's action back as its observation.

use agora_core::{
    AgentId, AgentObservation, Environment, EnvironmentError, EnvironmentResult,
    EnvironmentStepInput, EnvironmentStepResult, ToolExecutor, ToolResponse, to_payload,
};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

const SOURCE: &str = "loopback";

/// Ends the episode after a fixed number of steps. Deferred tool calls are
/// executed with the bound executor.
pub struct LoopbackEnvironment {
    executor: Arc<dyn ToolExecutor>,
    steps_per_episode: u64,
    roster: Vec<AgentId>,
    step: u64,
}

impl LoopbackEnvironment {
    pub fn new(executor: Arc<dyn ToolExecutor>, steps_per_episode: u64) -> Self {
        Self {
            executor,
            steps_per_episode,
            roster: Vec::new(),
            step: 0,
        }
    }

    fn observe(&self, input: Option<&EnvironmentStepInput>) -> EnvironmentStepResult {
        let mut result = EnvironmentStepResult::new();
        for agent in &self.roster {
            let heard = input
                .and_then(|input| input.actions.get(agent))
                .and_then(|action| action.get("say"))
                .cloned()
                .unwrap_or(Value::Null);
            let observation = AgentObservation::new(
                SOURCE,
                to_payload(json!({"step": self.step, "heard": heard})),
            );
            result = result
                .with_observation(agent.clone(), observation)
                .with_reward(agent.clone(), 0.0);
        }
        result
    }

    fn check_actions(input: &EnvironmentStepInput) -> EnvironmentResult<()> {
        for (agent, action) in &input.actions {
            if let Some(said) = action.get("say")
                && !said.is_string()
            {
                return Err(EnvironmentError::invalid_action(
                    agent.clone(),
                    format!("'say' must be a string, got {said}"),
                ));
            }
        }
        Ok(())
    }

    fn execute_deferred(
        &self,
        input: &EnvironmentStepInput,
    ) -> Option<BTreeMap<AgentId, Vec<ToolResponse>>> {
        if input.tool_invocations.is_empty() {
            return None;
        }
        let responses = input
            .tool_invocations
            .iter()
            .map(|(agent, invocations)| {
                let responses = invocations
                    .iter()
                    .map(|invocation| {
                        self.executor.execute(invocation).unwrap_or_else(|error| {
                            ToolResponse::failure(&invocation.tool_name, error.to_string())
                        })
                    })
                    .collect::<Vec<_>>();
                (agent.clone(), responses)
            })
            .collect();
        Some(responses)
    }
}

impl Environment for LoopbackEnvironment {
    fn reset(&mut self) -> EnvironmentResult<EnvironmentStepResult> {
        self.step = 0;
        Ok(self.observe(None))
    }

    fn step(&mut self, input: EnvironmentStepInput) -> EnvironmentResult<EnvironmentStepResult> {
        Self::check_actions(&input)?;
        self.step += 1;
        debug!(
            step = self.step,
            deferred_tool_calls = input.pending_tool_calls(),
            "Loopback step"
        );

        let mut result = self.observe(Some(&input));
        result.tool_responses = self.execute_deferred(&input);
        if self.step >= self.steps_per_episode {
            result = result.terminated();
        }
        Ok(result)
    }

    fn validate_agents(&mut self, agents: &[AgentId]) -> EnvironmentResult<()> {
        self.roster = agents.to_vec();
        Ok(())
    }

    fn tool_executor(&self) -> Option<Arc<dyn ToolExecutor>> {
        Some(Arc::clone(&self.executor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo::catalogue;
    use agora_core::ToolInvocation;

    fn agent(name: &str) -> AgentId {
        AgentId::parse(name).unwrap()
    }

    #[test]
    fn reflects_actions_and_terminates() {
        let executor = catalogue().unwrap();
        let mut env = LoopbackEnvironment::new(executor, 2);
        env.validate_agents(&[agent("a"), agent("b")]).unwrap();
        assert_eq!(env.reset().unwrap().observations.len(), 2);

        let input = EnvironmentStepInput::new()
            .with_action(agent("a"), to_payload(json!({"say": "hello"})))
            .with_tool_invocations(
                agent("b"),
                vec![ToolInvocation::new("echo", to_payload(json!({"text": "x"})))],
            );
        let first = env.step(input).unwrap();
        assert!(!first.terminated);
        assert_eq!(first.observations[&agent("a")].get("heard"), Some(&json!("hello")));
        assert_eq!(first.observations[&agent("b")].get("heard"), Some(&Value::Null));

        let tool_responses = first.tool_responses.unwrap();
        assert_eq!(tool_responses[&agent("b")][0].output["echo"], json!("X"));

        assert!(env.step(EnvironmentStepInput::new()).unwrap().terminated);
    }

    #[test]
    fn rejects_non_text_speech() {
        let mut env = LoopbackEnvironment::new(catalogue().unwrap(), 2);
        env.validate_agents(&[agent("a")]).unwrap();
        env.reset().unwrap();

        let input =
            EnvironmentStepInput::new().with_action(agent("a"), to_payload(json!({"say": 42})));
        let error = env.step(input).unwrap_err();
        assert!(matches!(
            &error,
            EnvironmentError::InvalidAction { agent: rejected, .. } if *rejected == agent("a")
        ));
        assert_eq!(error.error_code(), "ENV_INVALID_ACTION");
        // a rejected step does not advance the clock
        assert!(!env.step(EnvironmentStepInput::new()).unwrap().terminated);
    }
}
