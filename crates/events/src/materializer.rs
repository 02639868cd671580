//! Notification materialization.
//!
//! Turns a decoded envelope into one durable `pending` notification row:
//! source-service classification, content resolution, best-effort user
//! field extraction, then a single insert via the repository.

use serde_json::Value;
use uuid::Uuid;

use clubhub_core::content;
use clubhub_core::event::EventType;
use clubhub_db::models::notification::NewNotification;
use clubhub_db::repositories::NotificationRepo;
use clubhub_db::DbPool;

use crate::envelope::EventEnvelope;

/// Materialize one notification row from a decoded envelope.
///
/// Returns the id of the inserted row. The caller decides what a failure
/// means for acknowledgment; this function only reports it.
pub async fn materialize(pool: &DbPool, envelope: &EventEnvelope) -> Result<Uuid, sqlx::Error> {
    let new = build_notification(envelope);
    NotificationRepo::create(pool, &new).await
}

/// Assemble the row values for an envelope. Total: every envelope maps to
/// a full set of column values.
fn build_notification(envelope: &EventEnvelope) -> NewNotification {
    let event_type = EventType::parse(&envelope.event_type);
    let content = content::resolve(&event_type, &envelope.data);

    NewNotification {
        event_type: envelope.event_type.clone(),
        event_data: envelope.data.clone(),
        user_id: user_field(&envelope.data, "user_id", ""),
        user_name: user_field(&envelope.data, "user_name", "Unknown User"),
        user_email: user_field(&envelope.data, "user_email", ""),
        subject: content.subject,
        message: content.message,
        source_service: event_type.source_service().to_string(),
    }
}

/// Read a user field from the payload, treating missing, non-string, and
/// empty values as absent.
fn user_field(data: &Value, key: &str, fallback: &str) -> String {
    match data.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => fallback.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_created_builds_full_row() {
        let envelope = EventEnvelope::new(
            "order_created",
            json!({"id": "ORDER-42", "user_id": "user-1"}),
        );
        let new = build_notification(&envelope);

        assert_eq!(new.event_type, "order_created");
        assert_eq!(new.event_data["id"], "ORDER-42");
        assert_eq!(new.user_id, "user-1");
        assert_eq!(new.user_name, "Unknown User");
        assert_eq!(new.user_email, "");
        assert_eq!(new.subject, "Ticket Purchase Confirmation");
        assert!(new.message.contains("ORDER-42"));
        assert_eq!(new.source_service, "payments_service");
    }

    #[test]
    fn member_added_extracts_user_fields() {
        let envelope = EventEnvelope::new(
            "member_added",
            json!({
                "user_id": "user-7",
                "user_name": "Priya",
                "user_email": "priya@example.edu",
                "role": "officer"
            }),
        );
        let new = build_notification(&envelope);

        assert_eq!(new.user_id, "user-7");
        assert_eq!(new.user_name, "Priya");
        assert_eq!(new.user_email, "priya@example.edu");
        assert_eq!(new.source_service, "clubs_service");
    }

    #[test]
    fn empty_and_non_string_user_fields_fall_back() {
        let envelope = EventEnvelope::new(
            "rsvp_created",
            json!({"user_id": "", "user_name": 42}),
        );
        let new = build_notification(&envelope);

        assert_eq!(new.user_id, "");
        assert_eq!(new.user_name, "Unknown User");
        assert_eq!(new.user_email, "");
    }

    #[test]
    fn unknown_event_type_is_classified_unknown() {
        let envelope = EventEnvelope::new("archived", json!({"note": "cleanup"}));
        let new = build_notification(&envelope);

        assert_eq!(new.source_service, "unknown");
        assert_eq!(new.subject, "System Notification");
        assert_eq!(new.event_data["note"], "cleanup");
    }
}
