//! # Scripted Agents
//!
//! [`ScriptedAgent`] replays a fixed list of step outputs and records every
//! delivery it receives into an [`AgentProbe`] the test keeps after handing
//! the agent to a network.

use agora_core::{
    Agent, AgentContext, AgentError, AgentHooks, AgentId, AgentMessage, AgentObservation,
    AgentResult, AgentStepOutput, ToolResponse,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::events::{Event, EventLog};

/// Everything a scripted agent received.
#[derive(Debug, Clone, Default)]
pub struct AgentRecord {
    pub contexts: Vec<AgentContext>,
    pub observations: Vec<AgentObservation>,
    pub messages: Vec<AgentMessage>,
    pub tool_results: Vec<ToolResponse>,
    pub steps: usize,
    pub resets: usize,
}

/// Read side of a [`ScriptedAgent`], shared with the agent.
#[derive(Debug, Clone, Default)]
pub struct AgentProbe {
    record: Arc<Mutex<AgentRecord>>,
}

impl AgentProbe {
    /// Snapshot of the full record.
    pub fn record(&self) -> AgentRecord {
        self.lock().clone()
    }

    pub fn observations(&self) -> Vec<AgentObservation> {
        self.lock().observations.clone()
    }

    pub fn last_observation(&self) -> Option<AgentObservation> {
        self.lock().observations.last().cloned()
    }

    pub fn messages(&self) -> Vec<AgentMessage> {
        self.lock().messages.clone()
    }

    /// Contents of received messages, in delivery order.
    pub fn message_contents(&self) -> Vec<String> {
        self.lock()
            .messages
            .iter()
            .map(|message| message.content.clone())
            .collect()
    }

    pub fn tool_results(&self) -> Vec<ToolResponse> {
        self.lock().tool_results.clone()
    }

    pub fn last_tool_result(&self) -> Option<ToolResponse> {
        self.lock().tool_results.last().cloned()
    }

    /// The context received at registration, if any.
    pub fn context(&self) -> Option<AgentContext> {
        self.lock().contexts.first().cloned()
    }

    pub fn context_count(&self) -> usize {
        self.lock().contexts.len()
    }

    pub fn steps(&self) -> usize {
        self.lock().steps
    }

    pub fn resets(&self) -> usize {
        self.lock().resets
    }

    fn lock(&self) -> MutexGuard<'_, AgentRecord> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Agent that replays scripted outputs, then a fallback output forever.
///
/// `reset` rewinds the script; the probe keeps accumulating across episodes.
#[derive(Debug)]
pub struct ScriptedAgent {
    id: AgentId,
    script: Vec<AgentResult<AgentStepOutput>>,
    cursor: usize,
    fallback: AgentStepOutput,
    hooks: AgentHooks,
    probe: AgentProbe,
    log: Option<EventLog>,
}

impl ScriptedAgent {
    /// Create an agent that produces empty outputs.
    pub fn new(id: AgentId) -> Self {
        Self {
            id,
            script: Vec::new(),
            cursor: 0,
            fallback: AgentStepOutput::empty(),
            hooks: AgentHooks::ALL,
            probe: AgentProbe::default(),
            log: None,
        }
    }

    /// Append an output to the script.
    pub fn then(mut self, output: AgentStepOutput) -> Self {
        self.script.push(Ok(output));
        self
    }

    /// Append a failing step to the script.
    pub fn then_fail(mut self, error: AgentError) -> Self {
        self.script.push(Err(error));
        self
    }

    /// Output produced once the script is exhausted.
    pub fn repeating(mut self, output: AgentStepOutput) -> Self {
        self.fallback = output;
        self
    }

    pub fn with_hooks(mut self, hooks: AgentHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Handle for inspecting what this agent received.
    pub fn probe(&self) -> AgentProbe {
        self.probe.clone()
    }

    fn log(&self, event: Event) {
        if let Some(log) = &self.log {
            log.record(event);
        }
    }
}

impl Agent for ScriptedAgent {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn handle_observation(&mut self, observation: &AgentObservation) {
        self.log(Event::Observation(self.id.clone()));
        self.probe.lock().observations.push(observation.clone());
    }

    fn step(&mut self) -> AgentResult<AgentStepOutput> {
        self.log(Event::AgentStepped(self.id.clone()));
        self.probe.lock().steps += 1;

        let output = match self.script.get(self.cursor) {
            Some(scripted) => scripted.clone(),
            None => Ok(self.fallback.clone()),
        };
        self.cursor += 1;
        output
    }

    fn hooks(&self) -> AgentHooks {
        self.hooks
    }

    fn attach_context(&mut self, context: AgentContext) {
        self.log(Event::ContextAttached(self.id.clone()));
        self.probe.lock().contexts.push(context);
    }

    fn reset(&mut self) {
        self.log(Event::AgentReset(self.id.clone()));
        self.cursor = 0;
        self.probe.lock().resets += 1;
    }

    fn handle_message(&mut self, message: &AgentMessage) {
        self.log(Event::Message {
            recipient: self.id.clone(),
            sender: message.sender.clone(),
        });
        self.probe.lock().messages.push(message.clone());
    }

    fn handle_tool_result(&mut self, response: &ToolResponse) {
        self.log(Event::ToolResult {
            agent: self.id.clone(),
            tool: response.tool_name.clone(),
        });
        self.probe.lock().tool_results.push(response.clone());
    }
}

/// Parse an agent id.
///
/// # Panics
///
/// Panics if `name` is not a valid identifier.
pub fn agent_id(name: &str) -> AgentId {
    AgentId::parse(name).expect("valid agent id")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_agent_replays_then_falls_back() {
        let mut agent = ScriptedAgent::new(agent_id("a"))
            .then(AgentStepOutput::empty().terminated())
            .then_fail(AgentError::step_failed("scripted"));
        let probe = agent.probe();

        assert!(agent.step().unwrap().terminated);
        assert!(agent.step().is_err());
        assert!(agent.step().unwrap().is_empty());
        assert_eq!(probe.steps(), 3);

        agent.reset();
        assert!(agent.step().unwrap().terminated);
        assert_eq!(probe.resets(), 1);
    }

    #[test]
    fn scripted_agent_logs_events() {
        let log = EventLog::new();
        let mut agent = ScriptedAgent::new(agent_id("a")).with_log(log.clone());
        let sender = agent_id("b");

        agent.handle_message(&AgentMessage::broadcast(sender.clone(), "hi"));
        agent.step().unwrap();

        assert_eq!(
            log.events(),
            vec![
                Event::Message {
                    recipient: agent_id("a"),
                    sender,
                },
                Event::AgentStepped(agent_id("a")),
            ]
        );
        assert_eq!(agent.probe().message_contents(), ["hi"]);
    }
}
