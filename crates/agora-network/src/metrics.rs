//! Counters for network activity
//!
//! Totals only; no per-agent labels, so the struct stays the same size
//! however many agents join.

use serde::{Deserialize, Serialize};

/// Running totals kept by an [`AgenticNetwork`](crate::AgenticNetwork).
///
/// Counters survive `reset` and saturate instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    /// Episodes started (resets)
    pub episodes_total: u64,
    /// Completed ticks
    pub ticks_total: u64,
    /// Tool calls executed by the network (streaming)
    pub tool_calls_executed_total: u64,
    /// Tool calls handed to the environment (offline)
    pub tool_calls_deferred_total: u64,
    /// Tool calls skipped because no executor was bound
    pub tool_calls_skipped_total: u64,
    /// Tool responses delivered to agents
    pub tool_responses_delivered_total: u64,
    /// Message deliveries (a broadcast counts once per recipient)
    pub messages_delivered_total: u64,
    /// Messages dropped because the recipient is not registered
    pub messages_dropped_total: u64,
    /// Observations delivered to agents
    pub observations_delivered_total: u64,
    /// Observations addressed to unregistered agents
    pub observations_dropped_total: u64,
    /// Agents retired after requesting termination
    pub agents_retired_total: u64,
}

impl NetworkMetrics {
    pub(crate) fn record_episode(&mut self) {
        self.episodes_total = self.episodes_total.saturating_add(1);
    }

    pub(crate) fn record_tick(&mut self) {
        self.ticks_total = self.ticks_total.saturating_add(1);
    }

    pub(crate) fn record_tool_executed(&mut self) {
        self.tool_calls_executed_total = self.tool_calls_executed_total.saturating_add(1);
    }

    pub(crate) fn record_tools_deferred(&mut self, count: usize) {
        self.tool_calls_deferred_total = self
            .tool_calls_deferred_total
            .saturating_add(count as u64);
    }

    pub(crate) fn record_tools_skipped(&mut self, count: usize) {
        self.tool_calls_skipped_total = self.tool_calls_skipped_total.saturating_add(count as u64);
    }

    pub(crate) fn record_tool_response(&mut self) {
        self.tool_responses_delivered_total =
            self.tool_responses_delivered_total.saturating_add(1);
    }

    pub(crate) fn record_message_delivered(&mut self) {
        self.messages_delivered_total = self.messages_delivered_total.saturating_add(1);
    }

    pub(crate) fn record_message_dropped(&mut self) {
        self.messages_dropped_total = self.messages_dropped_total.saturating_add(1);
    }

    pub(crate) fn record_observation_delivered(&mut self) {
        self.observations_delivered_total = self.observations_delivered_total.saturating_add(1);
    }

    pub(crate) fn record_observation_dropped(&mut self) {
        self.observations_dropped_total = self.observations_dropped_total.saturating_add(1);
    }

    pub(crate) fn record_agent_retired(&mut self) {
        self.agents_retired_total = self.agents_retired_total.saturating_add(1);
    }
}
