//! The wire envelope shared by all producers and the consumer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A `{type, data}` message as placed on the shared queue.
///
/// `data` is an arbitrary JSON object whose schema varies per event type;
/// it is opaque to the broker and to the publisher. There is no envelope
/// versioning; producers and the content resolver stay in lockstep on
/// field names by convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Wire name of the event type, e.g. `"club_created"`.
    #[serde(rename = "type")]
    pub event_type: String,

    /// Producer-defined payload; defaults to an empty object.
    #[serde(default = "empty_object")]
    pub data: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

impl EventEnvelope {
    /// Build an envelope for publishing.
    pub fn new(event_type: impl Into<String>, data: Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Decode an envelope from a raw message body.
    pub fn from_bytes(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    /// Serialize to the UTF-8 JSON wire form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
