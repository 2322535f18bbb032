//! # Environment-Based Configuration
//!
//! Network settings can be supplied in code through [`NetworkConfigBuilder`]
//! or loaded from environment variables.
//!
//! ## Environment Variables
//!
//! - `AGORA_TOOL_EXECUTION_MODE` - `streaming` or `offline` (default: streaming)
//! - `AGORA_MAX_EPISODE_TICKS` - Tick limit for `run_episode` (default: 1000)

use agora_core::ToolExecutionMode;
use serde::{Deserialize, Serialize};
use std::env;

/// Default tick limit for a single episode.
pub const DEFAULT_MAX_EPISODE_TICKS: u64 = 1000;

/// Largest accepted tick limit.
pub const MAX_EPISODE_TICKS_LIMIT: u64 = 1_000_000;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable '{key}': {message}")]
    InvalidEnvVar { key: String, message: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl ConfigError {
    /// Stable error code suitable for logging or reporting.
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
            ConfigError::ValidationError(_) => "CONFIG_VALIDATION_FAILED",
        }
    }
}

/// Settings fixed when a network is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// How agents' tool calls are resolved
    pub tool_execution_mode: ToolExecutionMode,
    /// Tick limit for `run_episode`
    pub max_episode_ticks: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            tool_execution_mode: ToolExecutionMode::default(),
            max_episode_ticks: DEFAULT_MAX_EPISODE_TICKS,
        }
    }
}

impl NetworkConfig {
    #[must_use]
    pub fn builder() -> NetworkConfigBuilder {
        NetworkConfigBuilder::new()
    }
}

/// Builder for `NetworkConfig` with environment variable support
#[derive(Debug, Clone, Default)]
pub struct NetworkConfigBuilder {
    config: NetworkConfig,
}

impl NetworkConfigBuilder {
    /// Create a new builder with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any environment variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::default();

        if let Some(mode) = get_env_string("AGORA_TOOL_EXECUTION_MODE") {
            let mode = mode
                .parse::<ToolExecutionMode>()
                .map_err(|message| ConfigError::InvalidEnvVar {
                    key: "AGORA_TOOL_EXECUTION_MODE".to_string(),
                    message,
                })?;
            builder = builder.tool_execution_mode(mode);
        }
        if let Some(ticks) = get_env_u64("AGORA_MAX_EPISODE_TICKS")? {
            builder = builder.max_episode_ticks(ticks);
        }

        Ok(builder)
    }

    #[must_use]
    pub fn tool_execution_mode(mut self, mode: ToolExecutionMode) -> Self {
        self.config.tool_execution_mode = mode;
        self
    }

    #[must_use]
    pub fn max_episode_ticks(mut self, ticks: u64) -> Self {
        self.config.max_episode_ticks = ticks;
        self
    }

    /// Build the final configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the configuration is invalid.
    pub fn build(self) -> Result<NetworkConfig, ConfigError> {
        self.validate()?;
        Ok(self.config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.config.max_episode_ticks == 0 {
            return Err(ConfigError::ValidationError(
                "max_episode_ticks must be greater than 0".to_string(),
            ));
        }
        if self.config.max_episode_ticks > MAX_EPISODE_TICKS_LIMIT {
            return Err(ConfigError::ValidationError(format!(
                "max_episode_ticks must be <= {MAX_EPISODE_TICKS_LIMIT}"
            )));
        }
        Ok(())
    }
}

// Environment variable helper functions

fn get_env_string(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn get_env_u64(key: &str) -> Result<Option<u64>, ConfigError> {
    match env::var(key) {
        Ok(val) => val
            .parse::<u64>()
            .map(Some)
            .map_err(|e| ConfigError::InvalidEnvVar {
                key: key.to_string(),
                message: format!("invalid u64 value '{val}': {e}"),
            }),
        Err(_) => Ok(None),
    }
}
