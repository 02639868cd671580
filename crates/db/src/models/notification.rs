//! Notification entity model and DTOs.

use clubhub_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Values of the `notifications.status` column.
pub mod status {
    /// Materialized, not yet handed to a delivery channel.
    pub const PENDING: &str = "pending";
    pub const SENT: &str = "sent";
    pub const FAILED: &str = "failed";
}

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: Uuid,
    /// Wire name of the event that triggered this notification.
    pub event_type: String,
    /// Verbatim copy of the event payload, kept for audit and replay.
    pub event_data: serde_json::Value,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    /// Which service produced the original event.
    pub source_service: String,
    pub sent_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Field values for inserting a new notification row.
///
/// `status` is not included; new rows always start as `pending`.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub event_type: String,
    pub event_data: serde_json::Value,
    pub user_id: String,
    pub user_name: String,
    pub user_email: String,
    pub subject: String,
    pub message: String,
    pub source_service: String,
}

/// Optional filters for notification listings.
///
/// Every field is ANDed into the query when set.
#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    pub event_type: Option<String>,
    pub status: Option<String>,
    pub source_service: Option<String>,
    pub user_id: Option<String>,
    /// Case-insensitive substring match over subject, message, and user name.
    pub search: Option<String>,
}
