//! Domain event vocabulary.
//!
//! Every message on the shared queue carries a string event type.
//! [`EventType`] gives the known strings a closed enum form with a
//! catch-all arm, so consumers dispatch on variants instead of raw
//! strings while staying forward-compatible with types they do not
//! recognize.

use std::fmt;

/// A domain event type published by one of the producing services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    ClubCreated,
    ClubApproved,
    MemberAdded,
    EventCreated,
    RsvpCreated,
    OrderCreated,
    /// Any event type this consumer does not recognize.
    Other(String),
}

impl EventType {
    /// Parse the wire form of an event type.
    ///
    /// Unrecognized strings map to [`EventType::Other`]; parsing is total.
    pub fn parse(s: &str) -> Self {
        match s {
            "club_created" => Self::ClubCreated,
            "club_approved" => Self::ClubApproved,
            "member_added" => Self::MemberAdded,
            "event_created" => Self::EventCreated,
            "rsvp_created" => Self::RsvpCreated,
            "order_created" => Self::OrderCreated,
            other => Self::Other(other.to_string()),
        }
    }

    /// The wire form of this event type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::ClubCreated => "club_created",
            Self::ClubApproved => "club_approved",
            Self::MemberAdded => "member_added",
            Self::EventCreated => "event_created",
            Self::RsvpCreated => "rsvp_created",
            Self::OrderCreated => "order_created",
            Self::Other(s) => s,
        }
    }

    /// Which service produces events of this type.
    pub fn source_service(&self) -> SourceService {
        match self {
            Self::ClubCreated | Self::ClubApproved | Self::MemberAdded => SourceService::Clubs,
            Self::EventCreated | Self::RsvpCreated => SourceService::Events,
            Self::OrderCreated => SourceService::Payments,
            Self::Other(_) => SourceService::Unknown,
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The producing service inferred from an event type, recorded on each
/// notification for audit and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceService {
    Clubs,
    Events,
    Payments,
    Unknown,
}

impl SourceService {
    /// The stored form, e.g. `"clubs_service"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clubs => "clubs_service",
            Self::Events => "events_service",
            Self::Payments => "payments_service",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SourceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
