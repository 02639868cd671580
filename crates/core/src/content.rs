//! Notification content resolution.
//!
//! Maps an event type plus its payload to the subject and message stored
//! on a notification. Resolution is total over every `(event_type, data)`
//! pair: unknown types fall through to a generic template and missing
//! payload fields fall back to fixed literals, so it never fails.
//!
//! The templates and fallback strings are a compatibility contract with
//! existing consumers of notification text; change them only in lockstep
//! with whatever reads the `notifications` table.

use serde_json::Value;

use crate::event::EventType;

/// Resolved subject and message for a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub subject: String,
    pub message: String,
}

/// Read a string field from the payload, falling back when the key is
/// missing or holds a non-string value.
fn field<'a>(data: &'a Value, key: &str, fallback: &'a str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or(fallback)
}

/// Resolve the notification subject and message for an event.
pub fn resolve(event_type: &EventType, data: &Value) -> NotificationContent {
    let (subject, message) = match event_type {
        EventType::ClubCreated => {
            let name = field(data, "name", "Unknown Club");
            (
                "New Club Created".to_string(),
                format!("A new club '{name}' has been created and is pending approval."),
            )
        }
        EventType::ClubApproved => {
            let name = field(data, "name", "Unknown Club");
            (
                "Club Approved!".to_string(),
                format!("Congratulations! Your club '{name}' has been approved and is now active."),
            )
        }
        EventType::MemberAdded => {
            let user_name = field(data, "user_name", "Unknown User");
            let role = field(data, "role", "member");
            (
                "New Club Member".to_string(),
                format!("{user_name} has joined the club as a {role}."),
            )
        }
        EventType::EventCreated => {
            let name = field(data, "name", "Unknown Event");
            (
                "New Event Created".to_string(),
                format!("A new event '{name}' has been created for your club."),
            )
        }
        EventType::RsvpCreated => {
            let user_name = field(data, "user_name", "Unknown User");
            (
                "Event RSVP".to_string(),
                format!("{user_name} has RSVP'd for the event."),
            )
        }
        EventType::OrderCreated => {
            let id = field(data, "id", "Unknown");
            (
                "Ticket Purchase Confirmation".to_string(),
                format!("Your ticket purchase (Order #{id}) has been completed successfully."),
            )
        }
        EventType::Other(other) => (
            "System Notification".to_string(),
            format!("An event of type '{other}' has occurred in the system."),
        ),
    };

    NotificationContent { subject, message }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve_wire(event_type: &str, data: Value) -> NotificationContent {
        resolve(&EventType::parse(event_type), &data)
    }

    #[test]
    fn club_created_with_name() {
        let content = resolve_wire("club_created", json!({"name": "Chess Club"}));
        assert_eq!(content.subject, "New Club Created");
        assert_eq!(
            content.message,
            "A new club 'Chess Club' has been created and is pending approval."
        );
    }

    #[test]
    fn club_approved_with_name() {
        let content = resolve_wire("club_approved", json!({"name": "Robotics Club"}));
        assert_eq!(content.subject, "Club Approved!");
        assert_eq!(
            content.message,
            "Congratulations! Your club 'Robotics Club' has been approved and is now active."
        );
    }

    #[test]
    fn member_added_defaults_role() {
        let content = resolve_wire("member_added", json!({"user_name": "Alex"}));
        assert_eq!(content.subject, "New Club Member");
        assert_eq!(content.message, "Alex has joined the club as a member.");
    }

    #[test]
    fn member_added_with_role() {
        let content = resolve_wire("member_added", json!({"user_name": "Priya", "role": "officer"}));
        assert_eq!(content.message, "Priya has joined the club as a officer.");
    }

    #[test]
    fn member_added_empty_data_uses_both_fallbacks() {
        let content = resolve_wire("member_added", json!({}));
        assert_eq!(content.subject, "New Club Member");
        assert_eq!(content.message, "Unknown User has joined the club as a member.");
    }

    #[test]
    fn event_created_missing_name_uses_fallback() {
        let content = resolve_wire("event_created", json!({}));
        assert_eq!(content.subject, "New Event Created");
        assert_eq!(
            content.message,
            "A new event 'Unknown Event' has been created for your club."
        );
    }

    #[test]
    fn rsvp_created_uses_user_name() {
        let content = resolve_wire("rsvp_created", json!({"user_name": "Jamie"}));
        assert_eq!(content.subject, "Event RSVP");
        assert_eq!(content.message, "Jamie has RSVP'd for the event.");
    }

    #[test]
    fn order_created_includes_order_id() {
        let content = resolve_wire("order_created", json!({"id": "ORDER-42", "user_id": "user-1"}));
        assert_eq!(content.subject, "Ticket Purchase Confirmation");
        assert_eq!(
            content.message,
            "Your ticket purchase (Order #ORDER-42) has been completed successfully."
        );
    }

    #[test]
    fn unknown_type_uses_default_template() {
        let content = resolve_wire("archived", json!({"note": "cleanup"}));
        assert_eq!(content.subject, "System Notification");
        assert_eq!(
            content.message,
            "An event of type 'archived' has occurred in the system."
        );
    }

    #[test]
    fn non_string_fields_are_treated_as_absent() {
        let content = resolve_wire("club_created", json!({"name": 42}));
        assert_eq!(
            content.message,
            "A new club 'Unknown Club' has been created and is pending approval."
        );
    }

    /// Every event type, including unknown ones, resolves with empty data.
    #[test]
    fn resolution_is_total_over_empty_data() {
        for wire in [
            "club_created",
            "club_approved",
            "member_added",
            "event_created",
            "rsvp_created",
            "order_created",
            "something_new",
            "",
        ] {
            let content = resolve_wire(wire, json!({}));
            assert!(!content.subject.is_empty(), "{wire} produced an empty subject");
            assert!(!content.message.is_empty(), "{wire} produced an empty message");
        }
    }
}
