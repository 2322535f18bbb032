//! Validated identifier types
//!
//! Agents and tools are addressed by name everywhere in the orchestration
//! core: registries, step inputs, observation maps and message routing.
//! Names are therefore parsed once into newtypes and never re-validated.
//!
//! ```rust
//! use agora_core::identifiers::{AgentId, ToolId};
//!
//! let agent = AgentId::parse("agent-1").unwrap();
//! let tool = ToolId::parse("double").unwrap();
//!
//! assert!(AgentId::parse("").is_err());
//! assert!(ToolId::parse("two words").is_err());
//! # let _ = (agent, tool);
//! ```

mod validation;

pub use validation::{IdValidationError, MAX_ID_LENGTH, validate_id};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! validated_name {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            pub fn parse(name: impl AsRef<str>) -> Result<Self, IdValidationError> {
                let name = name.as_ref();
                validate_id(name)?;
                Ok(Self(name.to_owned()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(name: String) -> Result<Self, Self::Error> {
                validate_id(&name)?;
                Ok(Self(name))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

validated_name! {
    /// Unique name of an agent inside a network.
    ///
    /// Ordered so that per-agent maps iterate deterministically.
    AgentId
}

validated_name! {
    /// Unique name of a tool inside a registry.
    ToolId
}

/// Minted on every network reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(Uuid);

impl EpisodeId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
