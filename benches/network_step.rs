//! Network Tick Throughput Benchmarks
//!
//! Measures the cost of a full tick (agent steps, tool resolution, message
//! drain, environment step, observation fan-out) as the roster grows, in
//! both tool execution modes.

use agora::prelude::*;
use agora_testing::doubling_executor;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::json;
use std::hint::black_box;
use std::sync::Arc;
use std::time::Duration;

/// Observes every agent and runs deferred calls; keeps no history.
struct Arena {
    executor: Arc<dyn ToolExecutor>,
    roster: Vec<AgentId>,
    step: u64,
}

impl Environment for Arena {
    fn reset(&mut self) -> EnvironmentResult<EnvironmentStepResult> {
        self.step = 0;
        Ok(EnvironmentStepResult::new())
    }

    fn step(&mut self, input: EnvironmentStepInput) -> EnvironmentResult<EnvironmentStepResult> {
        self.step += 1;
        let mut result = EnvironmentStepResult::new();
        for agent in &self.roster {
            let observation =
                AgentObservation::new("arena", to_payload(json!({"step": self.step})));
            result = result.with_observation(agent.clone(), observation);
        }

        for (agent, invocations) in input.tool_invocations {
            let answered = invocations
                .iter()
                .map(|invocation| self.executor.execute(invocation))
                .collect::<ToolResult<Vec<_>>>()?;
            result = result.with_tool_responses(agent, answered);
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

/// Calls `double`, broadcasts and acts every tick.
struct Busy {
    id: AgentId,
    value: i64,
}

impl Agent for Busy {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn handle_observation(&mut self, _observation: &AgentObservation) {}

    fn handle_tool_result(&mut self, response: &ToolResponse) {
        if let Some(result) = response.output.get("result").and_then(|v| v.as_i64()) {
            self.value = result % 1_000;
        }
    }

    fn step(&mut self) -> AgentResult<AgentStepOutput> {
        Ok(AgentStepOutput::empty()
            .with_tool_invocation(ToolInvocation::new(
                "double",
                to_payload(json!({"value": self.value})),
            ))
            .with_message(AgentMessage::broadcast(self.id.clone(), "tick"))
            .with_environment_actions(to_payload(json!({"move": self.value}))))
    }
}

fn build_network(agents: usize, mode: ToolExecutionMode) -> AgenticNetwork<Arena> {
    let arena = Arena {
        executor: doubling_executor(),
        roster: Vec::new(),
        step: 0,
    };
    let mut network = AgenticNetwork::with_mode(arena, mode);

    for index in 0..agents {
        let id = AgentId::parse(format!("agent-{index}")).unwrap();
        network
            .register_agent(Busy {
                id,
                value: index as i64 + 1,
            })
            .unwrap();
    }
    network.reset().unwrap();
    network
}

/// Benchmark a single tick for growing rosters
fn bench_network_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_step");
    group.measurement_time(Duration::from_secs(5));

    for mode in [ToolExecutionMode::Streaming, ToolExecutionMode::Offline] {
        for agents in [1usize, 8, 32] {
            group.throughput(Throughput::Elements(agents as u64));
            group.bench_with_input(
                BenchmarkId::new(mode.as_str(), agents),
                &agents,
                |b, &agents| {
                    let mut network = build_network(agents, mode);
                    b.iter(|| black_box(network.step().unwrap()));
                },
            );
        }
    }

    group.finish();
}

/// Benchmark registration, which revalidates the roster each time
fn bench_registration(c: &mut Criterion) {
    c.bench_function("register_32_agents", |b| {
        b.iter(|| black_box(build_network(32, ToolExecutionMode::Streaming).len()));
    });
}

criterion_group!(benches, bench_network_step, bench_registration);
criterion_main!(benches);
