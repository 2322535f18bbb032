use agora_core::AgentMessage;
use std::collections::VecDeque;

/// FIFO of messages waiting for the next drain.
///
/// Owned by the network; never persisted and emptied on every reset.
#[derive(Debug, Clone, Default)]
pub struct MessageQueue {
    messages: VecDeque<AgentMessage>,
}

impl MessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: AgentMessage) {
        self.messages.push_back(message);
    }

    /// Take every queued message, oldest first, leaving the queue empty.
    pub fn take_all(&mut self) -> Vec<AgentMessage> {
        self.messages.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AgentMessage> {
        self.messages.iter()
    }
}

impl Extend<AgentMessage> for MessageQueue {
    fn extend<T: IntoIterator<Item = AgentMessage>>(&mut self, iter: T) {
        self.messages.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::AgentId;

    #[test]
    fn test_queue_is_fifo() {
        let sender = AgentId::parse("a").unwrap();
        let mut queue = MessageQueue::new();
        queue.push(AgentMessage::broadcast(sender.clone(), "first"));
        queue.extend([
            AgentMessage::broadcast(sender.clone(), "second"),
            AgentMessage::broadcast(sender, "third"),
        ]);
        assert_eq!(queue.len(), 3);

        let contents: Vec<_> = queue.take_all().into_iter().map(|m| m.content).collect();
        assert_eq!(contents, ["first", "second", "third"]);
        assert!(queue.is_empty());
    }
}
