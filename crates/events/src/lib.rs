//! Clubhub event distribution infrastructure.
//!
//! The producing services and the notification consumer share a single
//! durable RabbitMQ queue; this crate provides both sides of that
//! contract:
//!
//! - [`EventEnvelope`] — the `{type, data}` wire format.
//! - [`publish_event`] — best-effort, fire-and-forget emission used by
//!   producers after their own write commits.
//! - [`BrokerConfig`] / [`BrokerConnection`] — connection parameters and
//!   the consumer-side connection with bounded-backoff startup.
//! - [`materializer`] — turns a decoded envelope into one durable
//!   notification row.
//! - [`EventConsumer`] — the acknowledgment-owning consumer loop.

pub mod broker;
pub mod consumer;
pub mod envelope;
pub mod materializer;
pub mod publisher;

pub use broker::{BrokerConfig, BrokerConnection, BrokerError};
pub use consumer::{ConsumeError, EventConsumer};
pub use envelope::EventEnvelope;
pub use publisher::publish_event;
