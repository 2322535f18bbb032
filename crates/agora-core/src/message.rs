//! Observations and inter-agent messages.
//!
//! Both are plain values: the network clones nothing it does not have to,
//! delivers them by reference, and forgets them once the tick is over.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifiers::AgentId;

/// JSON object used for every free-form mapping exchanged through the core:
/// observation payloads, metadata, tool arguments and outputs, and
/// environment actions.
pub type Payload = serde_json::Map<String, Value>;

/// Convert an arbitrary JSON value into a [`Payload`].
///
/// Objects are taken as-is, `null` becomes an empty payload and any other
/// value is wrapped as `{"value": ...}`.
pub fn to_payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        Value::Null => Payload::new(),
        other => {
            let mut map = Payload::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

/// Something an agent perceives: produced by the environment, or
/// synthesized by the network on its behalf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentObservation {
    /// Who produced the observation, e.g. `"environment"`
    pub source: String,
    /// Observation content
    pub payload: Payload,
    /// Optional annotations such as the step counter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Payload>,
}

impl AgentObservation {
    /// Create an observation without metadata.
    pub fn new(source: impl Into<String>, payload: Payload) -> Self {
        Self {
            source: source.into(),
            payload,
            metadata: None,
        }
    }

    /// Attach metadata to the observation.
    pub fn with_metadata(mut self, metadata: Payload) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Look up a payload field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }

    /// Look up a payload field holding a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.payload.get(key).and_then(Value::as_str)
    }
}

/// Message exchanged between agents through the network queue.
///
/// A message without a recipient is a broadcast: it reaches every other
/// registered agent, never the sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMessage {
    /// Agent that produced the message
    pub sender: AgentId,
    /// Addressee; `None` broadcasts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<AgentId>,
    /// Message body
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Payload>,
}

impl AgentMessage {
    /// Create a message addressed to a single agent.
    pub fn direct(sender: AgentId, recipient: AgentId, content: impl Into<String>) -> Self {
        Self {
            sender,
            recipient: Some(recipient),
            content: content.into(),
            metadata: None,
        }
    }

    /// Create a message for every agent except the sender.
    pub fn broadcast(sender: AgentId, content: impl Into<String>) -> Self {
        Self {
            sender,
            recipient: None,
            content: content.into(),
            metadata: None,
        }
    }

    /// Attach metadata to the message.
    pub fn with_metadata(mut self, metadata: Payload) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Whether the message has no explicit recipient.
    pub fn is_broadcast(&self) -> bool {
        self.recipient.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn id(name: &str) -> AgentId {
        AgentId::parse(name).unwrap()
    }

    #[test]
    fn to_payload_handles_objects_null_and_scalars() {
        let object = to_payload(json!({"message": "hi"}));
        assert_eq!(object.get("message"), Some(&json!("hi")));

        assert!(to_payload(Value::Null).is_empty());

        let scalar = to_payload(json!(5));
        assert_eq!(scalar.get("value"), Some(&json!(5)));
    }

    #[test]
    fn observation_accessors() {
        let observation = AgentObservation::new("environment", to_payload(json!({"prompt": "go"})))
            .with_metadata(to_payload(json!({"step": 1})));

        assert_eq!(observation.get_str("prompt"), Some("go"));
        assert_eq!(observation.get_str("missing"), None);
        assert_eq!(
            observation.metadata.as_ref().and_then(|m| m.get("step")),
            Some(&json!(1))
        );
    }

    #[test]
    fn message_routing_shape() {
        let direct = AgentMessage::direct(id("a"), id("b"), "hello");
        assert!(!direct.is_broadcast());
        assert_eq!(direct.recipient, Some(id("b")));

        let broadcast = AgentMessage::broadcast(id("a"), "everyone");
        assert!(broadcast.is_broadcast());
    }

    #[test]
    fn broadcast_serializes_without_recipient() {
        let message = AgentMessage::broadcast(id("a"), "hi");
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value, json!({"sender": "a", "content": "hi"}));
    }
}
