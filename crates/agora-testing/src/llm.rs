//! Scripted language model client.

use agora_core::{LlmClient, LlmError, LlmMessage, LlmResult};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Answers with queued replies, then echoes the prompt.
///
/// Every prompt (for `chat`, the last message's content) is recorded;
/// clones share replies and history.
#[derive(Debug, Clone, Default)]
pub struct ScriptedLlmClient {
    replies: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.lock_replies().push_back(Ok(reply.into()));
        self
    }

    /// Queue a failure.
    pub fn with_error(self, error: LlmError) -> Self {
        self.lock_replies().push_back(Err(error));
        self
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, LlmError>>> {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LlmClient for ScriptedLlmClient {
    fn complete(&self, prompt: &str) -> Result<LlmResult, LlmError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());

        match self.lock_replies().pop_front() {
            Some(reply) => reply.map(LlmResult::new),
            None => Ok(LlmResult::new(prompt)),
        }
    }

    fn chat(&self, messages: &[LlmMessage]) -> Result<LlmResult, LlmError> {
        let last = messages
            .last()
            .ok_or_else(|| LlmError::RequestFailed("empty conversation".to_string()))?;
        self.complete(&last.content)
    }
}
