//! Descriptors sent to the API and typed payloads returned from it.
//!
//! # Design
//! Request descriptors (`UserProfile`, `EventDraft`, `EventFilter`) are
//! immutable value structs built by test code and passed by reference; the
//! clients never mutate them. Response payloads are decoded at the
//! deserialization boundary with explicit defaults, so a server that omits
//! an optional key yields a well-formed value instead of a lookup error
//! deep inside a test. Payloads that represent a completed operation carry
//! the raw HTTP status they were built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user of the Skylane application, as registered through the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Request payload for creating or replacing a personal event.
///
/// `recurrence_pattern` is omitted from the wire entirely when `None`;
/// the server treats an absent pattern and a one-off event the same way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub location: String,
    pub reminder_minutes: u32,
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_pattern: Option<String>,
}

/// Filters for listing events. Omitted filters are not sent as query
/// parameters; the server applies its own defaults (page size of 50).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub search: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Outcome of login, register, and token refresh.
///
/// `token` and `refresh_token` are `None` when the server did not issue
/// one (register does not log the user in). For login the server's
/// `message` wins over the default; the other operations use fixed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub user_id: Option<String>,
    pub message: String,
    pub status: u16,
}

/// Outcome of a token validation check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStatus {
    pub user_id: Option<String>,
    pub message: String,
    pub status: u16,
}

/// Outcome of operations whose success has no payload beyond confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub message: String,
    pub status: u16,
}

/// Account details of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub status: u16,
}

/// A personal event as returned by the API.
///
/// Every field is defaulted: a server that omits a key produces `None`,
/// an empty string, or zero rather than a decode failure. `id` is the
/// server-issued identifier and is absent only in degenerate responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub reminder_minutes: u32,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurrence_pattern: Option<String>,
}

/// Outcome of creating an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedEvent {
    pub event_id: Option<String>,
    pub event: EventRecord,
    pub message: String,
    pub status: u16,
}

/// One page of events plus the total match count before pagination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsPage {
    pub events: Vec<EventRecord>,
    pub total: u64,
    pub message: String,
    pub status: u16,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn draft() -> EventDraft {
        EventDraft {
            title: "Team Meeting".to_string(),
            description: "Weekly sync".to_string(),
            start_date: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2026, 3, 1, 11, 0, 0).unwrap(),
            location: "Conference Room A".to_string(),
            reminder_minutes: 15,
            is_recurring: false,
            recurrence_pattern: None,
        }
    }

    #[test]
    fn event_draft_omits_recurrence_pattern_when_none() {
        let json = serde_json::to_value(draft()).unwrap();
        assert!(json.get("recurrence_pattern").is_none());
        assert_eq!(json["title"], "Team Meeting");
        assert_eq!(json["reminder_minutes"], 15);
    }

    #[test]
    fn event_draft_keeps_recurrence_pattern_when_set() {
        let mut input = draft();
        input.is_recurring = true;
        input.recurrence_pattern = Some("WEEKLY".to_string());
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["recurrence_pattern"], "WEEKLY");
        assert_eq!(json["is_recurring"], true);
    }

    #[test]
    fn event_draft_dates_roundtrip_as_rfc3339() {
        let json = serde_json::to_string(&draft()).unwrap();
        let back: EventDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back.start_date, draft().start_date);
        assert_eq!(back.end_date, draft().end_date);
    }

    #[test]
    fn event_record_minimal_body_takes_defaults() {
        let record: EventRecord = serde_json::from_str(r#"{"title":"Sparse"}"#).unwrap();
        assert_eq!(record.title, "Sparse");
        assert!(record.id.is_none());
        assert!(record.start_date.is_none());
        assert!(record.description.is_empty());
        assert_eq!(record.reminder_minutes, 0);
        assert!(!record.is_recurring);
        assert!(record.recurrence_pattern.is_none());
    }

    #[test]
    fn event_record_full_body_decodes() {
        let record: EventRecord = serde_json::from_str(
            r#"{
                "id": "ev-1",
                "title": "Flight check-in",
                "description": "Opens 24h before departure",
                "start_date": "2026-03-01T10:00:00Z",
                "end_date": "2026-03-01T11:00:00Z",
                "location": "Online",
                "reminder_minutes": 60,
                "is_recurring": false
            }"#,
        )
        .unwrap();
        assert_eq!(record.id.as_deref(), Some("ev-1"));
        assert_eq!(
            record.start_date,
            Some(Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(record.reminder_minutes, 60);
    }

    #[test]
    fn user_profile_omits_phone_when_none() {
        let profile = UserProfile {
            email: "qa@example.com".to_string(),
            password: "Test123!".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: None,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("phone").is_none());
        assert_eq!(json["email"], "qa@example.com");
    }
}
