//! The notification consumer loop.
//!
//! Wires the broker connection and the materializer together and owns the
//! acknowledgment policy: every delivery is acknowledged exactly once,
//! whether or not it produced a notification row. Delivery is
//! at-least-once; keeping the queue moving outranks any individual
//! notification, so malformed bodies and persistence failures are logged,
//! acknowledged, and dropped rather than requeued.

use futures::StreamExt;
use lapin::message::Delivery;
use lapin::options::{BasicAckOptions, BasicConsumeOptions};
use lapin::types::FieldTable;
use tokio_util::sync::CancellationToken;

use clubhub_db::DbPool;

use crate::broker::{BrokerConfig, BrokerConnection, BrokerError, EVENTS_QUEUE, MAX_CONNECT_ATTEMPTS};
use crate::envelope::EventEnvelope;
use crate::materializer;

/// Consumer tag registered with the broker.
const CONSUMER_TAG: &str = "clubhub-notifications";

/// Fatal consumer outcomes. Per-message failures never surface here.
#[derive(Debug, thiserror::Error)]
pub enum ConsumeError {
    /// The broker stayed unreachable through every startup attempt.
    #[error("broker unreachable after {attempts} attempts: {source}")]
    ConnectExhausted {
        attempts: u32,
        #[source]
        source: BrokerError,
    },

    /// The transport failed while the consumer was blocked on receive.
    /// Recovery is a process restart, not an in-place reconnect.
    #[error("transport error while consuming: {0}")]
    Transport(#[source] lapin::Error),

    /// The broker closed the delivery stream without an error.
    #[error("delivery stream closed by broker")]
    StreamClosed,
}

/// Consumes the shared `events` queue and materializes notifications.
///
/// One logical consumer per process; message handling is sequential
/// (decode, materialize, acknowledge, receive next) with no internal
/// concurrency. Scaling out means running more worker processes against
/// the same queue.
pub struct EventConsumer {
    config: BrokerConfig,
    pool: DbPool,
}

impl EventConsumer {
    pub fn new(config: BrokerConfig, pool: DbPool) -> Self {
        Self { config, pool }
    }

    /// Run the consumer until cancelled or the transport fails.
    ///
    /// Connects with bounded backoff, registers as the queue's consumer
    /// with manual acknowledgment, then processes deliveries one at a
    /// time. A cancellation is honored between messages; the in-flight
    /// message is always finished and acknowledged first. The connection
    /// is closed on every exit path.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), ConsumeError> {
        let conn = BrokerConnection::open_with_retry(&self.config)
            .await
            .map_err(|source| ConsumeError::ConnectExhausted {
                attempts: MAX_CONNECT_ATTEMPTS,
                source,
            })?;

        let mut deliveries = conn
            .channel()
            .basic_consume(
                EVENTS_QUEUE,
                CONSUMER_TAG,
                // Manual acknowledgment; nothing is acked until handled.
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(ConsumeError::Transport)?;

        tracing::info!(queue = EVENTS_QUEUE, "Consuming events");

        let result = loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Consumer cancelled, shutting down");
                    break Ok(());
                }
                delivery = deliveries.next() => match delivery {
                    Some(Ok(delivery)) => self.handle_delivery(delivery).await,
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "Transport error while consuming");
                        break Err(ConsumeError::Transport(e));
                    }
                    None => {
                        tracing::error!("Delivery stream closed by broker");
                        break Err(ConsumeError::StreamClosed);
                    }
                },
            }
        };

        conn.close().await;
        result
    }

    /// Process one delivery and acknowledge it.
    ///
    /// A body that does not decode is a poison message: acknowledged and
    /// dropped so broker redelivery cannot loop on it forever. A decoded
    /// envelope whose materialization fails is likewise acknowledged; the
    /// event is lost to the notification surface but the queue keeps
    /// moving.
    async fn handle_delivery(&self, delivery: Delivery) {
        match EventEnvelope::from_bytes(&delivery.data) {
            Ok(envelope) => {
                tracing::info!(event_type = %envelope.event_type, "Received event");
                match materializer::materialize(&self.pool, &envelope).await {
                    Ok(id) => tracing::info!(
                        notification_id = %id,
                        event_type = %envelope.event_type,
                        "Created notification"
                    ),
                    Err(e) => tracing::warn!(
                        event_type = %envelope.event_type,
                        error = %e,
                        "Failed to create notification, dropping event"
                    ),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse message body, dropping");
            }
        }

        if let Err(e) = delivery.ack(BasicAckOptions::default()).await {
            tracing::error!(error = %e, "Failed to acknowledge message");
        }
    }
}
