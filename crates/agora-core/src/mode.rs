//! Tool execution disciplines.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a network resolves the tool calls agents request during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolExecutionMode {
    /// The network runs every call through the environment's executor
    /// right after the agents step, before the environment is stepped.
    #[default]
    Streaming,
    /// Calls are handed to the environment inside its step input; the
    /// environment decides whether and how to run them.
    Offline,
}

impl ToolExecutionMode {
    /// Lowercase name used in configuration and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Streaming => "streaming",
            Self::Offline => "offline",
        }
    }
}

impl FromStr for ToolExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "streaming" => Ok(Self::Streaming),
            "offline" => Ok(Self::Offline),
            _ => Err(format!(
                "Invalid tool execution mode '{}'. Valid values: 'streaming', 'offline'",
                s
            )),
        }
    }
}

impl fmt::Display for ToolExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
