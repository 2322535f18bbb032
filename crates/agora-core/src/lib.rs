//! # Agora Core
//!
//! Contracts and value types shared by every part of the Agora
//! orchestration core: validated identifiers, the error taxonomy, the
//! records exchanged during a tick, and the traits implemented by agents,
//! environments, tools, tool executors and LLM clients.
//!
//! The orchestrator itself lives in `agora-network`; the tool registry and
//! default executor live in `agora-tools`.

pub mod agent;
pub mod environment;
pub mod error;
pub mod identifiers;
pub mod llm;
pub mod message;
pub mod mode;
pub mod tool;

pub use agent::{Agent, AgentContext, AgentHooks, AgentStepOutput};
pub use environment::{Environment, EnvironmentStepInput, EnvironmentStepResult};
pub use error::{
    AgentError, AgentResult, EnvironmentError, EnvironmentResult, LlmError, ToolError, ToolResult,
};
pub use identifiers::{AgentId, EpisodeId, IdValidationError, ToolId};
pub use llm::{ChatRole, LlmClient, LlmMessage, LlmResult, LlmStream, LlmStreamChunk};
pub use message::{AgentMessage, AgentObservation, Payload, to_payload};
pub use mode::ToolExecutionMode;
pub use tool::{Tool, ToolExecutor, ToolInvocation, ToolMetadata, ToolResponse};
