use agora_core::{ToolExecutionMode, ToolExecutor};
use agora_network::{ConfigError, NetworkConfigBuilder, NetworkError};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};

mod demo;

use demo::{DemoError, build_network, catalogue};

#[derive(Parser, Debug)]
#[command(name = "agora", version)]
#[command(about = "Agora CLI - run the loopback agentic network demo")]
struct Cli {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Json, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one episode of the loopback demo, printing observations per tick
    Run {
        /// Number of echo agents
        #[arg(long, default_value_t = 2)]
        agents: usize,
        /// Tool execution mode (default: AGORA_TOOL_EXECUTION_MODE or streaming)
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Tick limit (default: AGORA_MAX_EPISODE_TICKS or 1000)
        #[arg(long)]
        max_ticks: Option<u64>,
        /// Steps before the loopback environment ends the episode
        #[arg(long, default_value_t = 3)]
        steps_per_episode: u64,
    },
    /// List the demo tool catalogue as JSON
    Tools,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LogFormat {
    Json,
    Pretty,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ModeArg {
    Streaming,
    Offline,
}

impl From<ModeArg> for ToolExecutionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Streaming => ToolExecutionMode::Streaming,
            ModeArg::Offline => ToolExecutionMode::Offline,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Demo setup failed: {0}")]
    Demo(#[from] DemoError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env();
    let env_filter = match "info".parse() {
        Ok(directive) => env_filter.add_directive(directive),
        Err(_) => env_filter,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
    };
}

fn run(
    agents: usize,
    mode: Option<ModeArg>,
    max_ticks: Option<u64>,
    steps_per_episode: u64,
) -> Result<(), CliError> {
    let mut builder = NetworkConfigBuilder::from_env()?;
    if let Some(mode) = mode {
        builder = builder.tool_execution_mode(mode.into());
    }
    if let Some(max_ticks) = max_ticks {
        builder = builder.max_episode_ticks(max_ticks);
    }
    let config = builder.build()?;

    let mut network = build_network(config, agents, steps_per_episode)?;
    let initial = network.reset()?;
    println!("tick 0: {}", serde_json::to_string(&initial.observations)?);

    while network.tick() < config.max_episode_ticks {
        let result = network.step()?;
        println!(
            "tick {}: {}",
            network.tick(),
            serde_json::to_string(&result.observations)?
        );
        if result.terminated {
            break;
        }
    }

    info!(
        ticks = network.tick(),
        mode = %network.mode(),
        metrics = %serde_json::to_string(network.metrics())?,
        "Demo finished"
    );
    Ok(())
}

fn list_tools() -> Result<(), CliError> {
    let executor = catalogue().map_err(DemoError::from)?;
    println!("{}", serde_json::to_string_pretty(&executor.list_tools())?);
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let outcome = match cli.command {
        Commands::Run {
            agents,
            mode,
            max_ticks,
            steps_per_episode,
        } => run(agents, mode, max_ticks, steps_per_episode),
        Commands::Tools => list_tools(),
    };

    if let Err(e) = outcome {
        error!(error = %e, "Command failed");
        std::process::exit(1);
    }
}
