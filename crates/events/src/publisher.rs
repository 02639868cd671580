//! Best-effort event publishing for producing services.
//!
//! Producers call [`publish_event`] after their own write commits. The
//! call never fails: a broker outage costs the event, not the producer's
//! write. Each call opens its own connection and closes it again, so
//! producers hold no long-lived broker state.

use serde_json::Value;

use crate::broker::{BrokerConfig, BrokerConnection};
use crate::envelope::EventEnvelope;

/// Publish a `{type, data}` envelope to the shared `events` queue.
///
/// Transport and serialization failures are logged and swallowed; at most
/// one message reaches the queue per call and nothing is retried or
/// buffered. Callers must not depend on delivery for the correctness of
/// their own domain state.
pub async fn publish_event(config: &BrokerConfig, event_type: &str, data: Value) {
    let envelope = EventEnvelope::new(event_type, data);
    let body = match envelope.to_bytes() {
        Ok(body) => body,
        Err(e) => {
            tracing::warn!(event_type, error = %e, "Failed to serialize event, dropping");
            return;
        }
    };

    match BrokerConnection::open(config).await {
        Ok(conn) => {
            match conn.publish(&body).await {
                Ok(()) => tracing::debug!(event_type, "Published event"),
                Err(e) => {
                    tracing::warn!(event_type, error = %e, "Failed to publish event, dropping")
                }
            }
            conn.close().await;
        }
        Err(e) => {
            tracing::warn!(event_type, error = %e, "Broker unavailable, dropping event");
        }
    }
}
