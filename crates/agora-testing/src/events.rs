//! Shared, ordered log of what fixtures observed.
//!
//! Hand the same [`EventLog`] to agents and environments to assert on the
//! relative order of deliveries and environment steps within a tick.

use agora_core::AgentId;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ContextAttached(AgentId),
    AgentReset(AgentId),
    AgentStepped(AgentId),
    ToolResult { agent: AgentId, tool: String },
    Message { recipient: AgentId, sender: AgentId },
    Observation(AgentId),
    EnvironmentReset,
    EnvironmentStepped,
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<Event>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    /// Snapshot of every event so far.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Index of the first event matching the predicate.
    pub fn position(&self, predicate: impl Fn(&Event) -> bool) -> Option<usize> {
        self.events().iter().position(predicate)
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
