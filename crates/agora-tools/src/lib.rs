//! # Agora Tools
//!
//! Tool storage and execution for Agora networks.
//!
//! - [`ToolRegistry`]: name-keyed store of [`Tool`](agora_core::Tool)
//!   implementations with duplicate and unknown-name rejection
//! - [`DefaultToolExecutor`]: the [`ToolExecutor`](agora_core::ToolExecutor)
//!   that runs invocations straight against a registry

/// Tool executor implementations.
pub mod executor;
/// Tool registry for managing collections of tools.
pub mod registry;

pub use executor::DefaultToolExecutor;
pub use registry::{RegisteredTool, ToolRegistry};
