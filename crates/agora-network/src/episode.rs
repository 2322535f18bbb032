use agora_core::{EnvironmentStepResult, EpisodeId};
use serde::{Deserialize, Serialize};

/// Why [`AgenticNetwork::run_episode`](crate::AgenticNetwork::run_episode)
/// stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EpisodeEnd {
    /// The environment reported `terminated`
    EnvironmentTerminated,
    /// Every agent asked to stop (or none were registered)
    AgentsRetired,
    /// The configured tick limit was reached
    TickLimit,
}

/// Outcome of a complete episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode_id: EpisodeId,
    /// Ticks executed after the reset
    pub ticks: u64,
    pub end: EpisodeEnd,
    /// Result of the final tick, or of the reset when no tick ran
    pub last_result: EnvironmentStepResult,
}
