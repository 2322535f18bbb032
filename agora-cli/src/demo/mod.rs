//! The loopback demo: echo agents talking through a loopback environment.

mod echo;
mod loopback;

pub use echo::{ECHO_TOOL, EchoAgent, EchoLlmClient, EchoTool};
pub use loopback::LoopbackEnvironment;

use agora_core::{AgentId, Tool, ToolExecutor, ToolResult};
use agora_network::{AgenticNetwork, NetworkConfig, NetworkError};
use agora_tools::{DefaultToolExecutor, ToolRegistry};
use std::sync::Arc;

/// Executor over the demo tools.
pub fn catalogue() -> ToolResult<Arc<dyn ToolExecutor>> {
    let registry = ToolRegistry::from_tools([Arc::new(EchoTool) as Arc<dyn Tool>])?;
    Ok(Arc::new(DefaultToolExecutor::from(registry)))
}

/// Build a loopback network with `agents` echo agents named `echo-1`, `echo-2`, ...
pub fn build_network(
    config: NetworkConfig,
    agents: usize,
    steps_per_episode: u64,
) -> Result<AgenticNetwork<LoopbackEnvironment>, DemoError> {
    let environment = LoopbackEnvironment::new(catalogue()?, steps_per_episode);
    let mut network = AgenticNetwork::with_config(environment, config);
    for index in 1..=agents {
        let id = AgentId::parse(format!("echo-{index}"))
            .map_err(|error| DemoError::InvalidAgentName(error.to_string()))?;
        network.register_agent(EchoAgent::new(id))?;
    }
    Ok(network)
}

/// Failure while assembling the demo.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("Invalid demo agent name: {0}")]
    InvalidAgentName(String),

    #[error(transparent)]
    Tool(#[from] agora_core::ToolError),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::ToolExecutionMode;
    use agora_network::EpisodeEnd;
    use rstest::rstest;

    #[test]
    fn catalogue_lists_echo_tool() {
        let tools = catalogue().unwrap().list_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name, ECHO_TOOL);
    }

    #[rstest]
    #[case::streaming(ToolExecutionMode::Streaming)]
    #[case::offline(ToolExecutionMode::Offline)]
    fn demo_episode_runs_to_completion(#[case] mode: ToolExecutionMode) {
        let config = NetworkConfig::builder()
            .tool_execution_mode(mode)
            .max_episode_ticks(10)
            .build()
            .unwrap();
        let mut network = build_network(config, 3, 4).unwrap();
        assert_eq!(network.len(), 3);

        let summary = network.run_episode().unwrap();
        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.end, EpisodeEnd::EnvironmentTerminated);
        // every agent echoes once per tick
        assert_eq!(network.metrics().tool_responses_delivered_total, 12);
        // each broadcast reaches the two other agents
        assert_eq!(network.metrics().messages_delivered_total, 24);
    }

    #[test]
    fn agent_registered_mid_episode_can_step() {
        let mut network = build_network(NetworkConfig::default(), 1, 5).unwrap();
        network.reset().unwrap();
        network.register_agent(EchoAgent::new(AgentId::parse("late").unwrap())).unwrap();

        network.step().unwrap();
        assert_eq!(network.len(), 2);
    }
}
