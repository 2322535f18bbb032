//! # LLM Client Contract
//!
//! Agents typically consult a language model while stepping. The transport
//! belongs to the client implementation; the orchestration core only fixes
//! the shape of the conversation records and the client interface.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::LlmError;
use crate::message::Payload;

/// Role of a chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Tool,
}

impl ChatRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatRole::System => "system",
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
            ChatRole::Tool => "tool",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chat-style message, either sent to a model or emitted by an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: ChatRole,
    pub content: String,
    /// Optional author name, e.g. the tool that produced a `tool` message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Payload>,
}

impl LlmMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            name: None,
            metadata: None,
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }

    /// A message carrying a tool's output back into the conversation.
    pub fn tool(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(ChatRole::Tool, content).with_name(name)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Payload) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A completed model answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmResult {
    /// Generated text
    pub text: String,
    /// Provider response as received, if the client keeps it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
    /// Token accounting reported by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Payload>,
}

impl LlmResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            raw: None,
            usage: None,
        }
    }

    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = Some(raw);
        self
    }

    pub fn with_usage(mut self, usage: Payload) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// One incremental piece of a streamed answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmStreamChunk {
    pub text_delta: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

/// Iterator over streamed chunks.
pub type LlmStream<'a> = Box<dyn Iterator<Item = Result<LlmStreamChunk, LlmError>> + 'a>;

/// Language model client used by agents.
///
/// Calls block until the provider answers; any waiting happens inside the
/// implementation.
pub trait LlmClient: Send + Sync {
    /// Complete a single prompt.
    fn complete(&self, prompt: &str) -> Result<LlmResult, LlmError>;

    /// Answer a conversation.
    fn chat(&self, messages: &[LlmMessage]) -> Result<LlmResult, LlmError>;

    /// Answer a conversation incrementally.
    fn stream_chat(&self, _messages: &[LlmMessage]) -> Result<LlmStream<'_>, LlmError> {
        Err(LlmError::StreamingUnsupported)
    }

    /// Prepare the client (open connections, load weights) before first use.
    fn warmup(&self) -> Result<(), LlmError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReverseClient;

    impl LlmClient for ReverseClient {
        fn complete(&self, prompt: &str) -> Result<LlmResult, LlmError> {
            Ok(LlmResult::new(prompt.chars().rev().collect::<String>()))
        }

        fn chat(&self, messages: &[LlmMessage]) -> Result<LlmResult, LlmError> {
            let last = messages
                .last()
                .ok_or_else(|| LlmError::InvalidResponse("empty conversation".to_string()))?;
            self.complete(&last.content)
        }
    }

    #[test]
    fn test_default_stream_is_unsupported() {
        let client = ReverseClient;
        let result = client.stream_chat(&[LlmMessage::user("hi")]);
        assert!(matches!(result, Err(LlmError::StreamingUnsupported)));
        assert!(client.warmup().is_ok());
    }

    #[test]
    fn test_chat_uses_last_message() {
        let client = ReverseClient;
        let messages = [LlmMessage::system("be terse"), LlmMessage::user("abc")];
        assert_eq!(client.chat(&messages).unwrap().text, "cba");
        assert!(client.chat(&[]).is_err());
    }

    #[test]
    fn test_chat_role_serializes_lowercase() {
        let message = LlmMessage::tool("double", "10");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "tool");
        assert_eq!(json["name"], "double");
        assert!(json.get("metadata").is_none());
    }
}
