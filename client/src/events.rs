//! Client for the personal-events resource family.
//!
//! # Design
//! `EventsClient` fixes its bearer token at construction through the
//! consuming `with_token` builder and is immutable afterwards; a test that
//! needs a second identity builds a second client. Operations follow the
//! same `build_*` / `parse_*` split as the auth client, with the addition
//! of query-parameter building for list filters. `get`, `update`, and
//! `delete` treat 404 as the designated "event does not exist" outcome.

use chrono::{Duration, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::config::Settings;
use crate::error::{self, ApiError, Outcome};
use crate::http::{bearer_header, json_content_header, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Ack, CreatedEvent, EventDraft, EventFilter, EventRecord, EventsPage};

/// Synchronous client for `/api/v1/events`.
#[derive(Debug, Clone)]
pub struct EventsClient {
    base_url: String,
    token: Option<String>,
    transport: Transport,
}

impl EventsClient {
    /// Build an unauthenticated client; chain [`EventsClient::with_token`]
    /// to attach the bearer credential.
    pub fn new(settings: &Settings) -> Outcome<Self> {
        Ok(Self {
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            token: None,
            transport: Transport::new(settings)?,
        })
    }

    /// Attach the bearer token used on every request from this client.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Create a new event from a draft.
    pub fn create_event(&self, draft: &EventDraft) -> Outcome<CreatedEvent> {
        debug!(title = %draft.title, "creating event");
        let request = self.build_create_event(draft)?;
        let response = self.transport.execute(&request)?;
        self.parse_create_event(response)
    }

    /// Fetch one event by its server-issued id.
    pub fn get_event(&self, id: &str) -> Outcome<EventRecord> {
        let request = self.build_get_event(id);
        let response = self.transport.execute(&request)?;
        self.parse_get_event(response)
    }

    /// Replace an event's fields with the given draft.
    pub fn update_event(&self, id: &str, draft: &EventDraft) -> Outcome<EventRecord> {
        let request = self.build_update_event(id, draft)?;
        let response = self.transport.execute(&request)?;
        self.parse_update_event(response)
    }

    /// Delete an event by id.
    pub fn delete_event(&self, id: &str) -> Outcome<Ack> {
        debug!(id, "deleting event");
        let request = self.build_delete_event(id);
        let response = self.transport.execute(&request)?;
        self.parse_delete_event(response)
    }

    /// List events matching the filter. Omitted filters are not sent.
    pub fn list_events(&self, filter: &EventFilter) -> Outcome<EventsPage> {
        let request = self.build_list_events(filter);
        let response = self.transport.execute(&request)?;
        self.parse_list_events(response)
    }

    /// List events whose titles contain `title`, per the server's search.
    pub fn search_by_title(&self, title: &str) -> Outcome<EventsPage> {
        let filter = EventFilter {
            search: Some(title.to_string()),
            ..EventFilter::default()
        };
        self.list_events(&filter)
    }

    /// First event whose title matches `title` exactly.
    ///
    /// The scan covers only the page the server returned; with more
    /// matches than the server's page size the event may be missed even
    /// though it exists. `EventsPage::total` exposes the gap.
    pub fn find_by_title(&self, title: &str) -> Outcome<Option<EventRecord>> {
        let page = self.search_by_title(title)?;
        Ok(page.events.into_iter().find(|event| event.title == title))
    }

    /// Whether an event with exactly this title exists on the returned
    /// page. Same pagination caveat as [`EventsClient::find_by_title`].
    pub fn event_exists(&self, title: &str) -> Outcome<bool> {
        Ok(self.find_by_title(title)?.is_some())
    }

    /// Events starting within the next `days` days.
    pub fn upcoming_events(&self, days: i64) -> Outcome<EventsPage> {
        let now = Utc::now();
        let filter = EventFilter {
            from: Some(now),
            to: Some(now + Duration::days(days)),
            ..EventFilter::default()
        };
        self.list_events(&filter)
    }

    pub fn build_create_event(&self, draft: &EventDraft) -> Outcome<HttpRequest> {
        let body = to_json(draft)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/v1/events", self.base_url),
            query: Vec::new(),
            headers: self.request_headers(true),
            body: Some(body),
        })
    }

    pub fn build_get_event(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/v1/events/{id}", self.base_url),
            query: Vec::new(),
            headers: self.request_headers(false),
            body: None,
        }
    }

    pub fn build_update_event(&self, id: &str, draft: &EventDraft) -> Outcome<HttpRequest> {
        let body = to_json(draft)?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/api/v1/events/{id}", self.base_url),
            query: Vec::new(),
            headers: self.request_headers(true),
            body: Some(body),
        })
    }

    pub fn build_delete_event(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/api/v1/events/{id}", self.base_url),
            query: Vec::new(),
            headers: self.request_headers(false),
            body: None,
        }
    }

    pub fn build_list_events(&self, filter: &EventFilter) -> HttpRequest {
        let mut query = Vec::new();
        if let Some(limit) = filter.limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(offset) = filter.offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(search) = &filter.search {
            query.push(("search".to_string(), search.clone()));
        }
        if let Some(from) = filter.from {
            query.push(("from".to_string(), from.to_rfc3339()));
        }
        if let Some(to) = filter.to {
            query.push(("to".to_string(), to.to_rfc3339()));
        }
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/v1/events", self.base_url),
            query,
            headers: self.request_headers(false),
            body: None,
        }
    }

    pub fn parse_create_event(&self, response: HttpResponse) -> Outcome<CreatedEvent> {
        if response.status != 201 {
            return Err(ApiError::rejected(&response, "could not create event"));
        }
        let body: CreateEventBody = error::decode(&response.body)?;
        Ok(CreatedEvent {
            event_id: body.event_id,
            event: body.event,
            message: body.message.unwrap_or_else(|| "event created".to_string()),
            status: response.status,
        })
    }

    pub fn parse_get_event(&self, response: HttpResponse) -> Outcome<EventRecord> {
        if response.status == 404 {
            return Err(ApiError::NotFound { resource: "event" });
        }
        if response.status != 200 {
            return Err(ApiError::rejected(&response, "could not fetch event"));
        }
        error::decode(&response.body)
    }

    pub fn parse_update_event(&self, response: HttpResponse) -> Outcome<EventRecord> {
        if response.status == 404 {
            return Err(ApiError::NotFound { resource: "event" });
        }
        if response.status != 200 {
            return Err(ApiError::rejected(&response, "could not update event"));
        }
        error::decode(&response.body)
    }

    pub fn parse_delete_event(&self, response: HttpResponse) -> Outcome<Ack> {
        if response.status == 404 {
            return Err(ApiError::NotFound { resource: "event" });
        }
        if response.status != 204 {
            return Err(ApiError::rejected(&response, "could not delete event"));
        }
        Ok(Ack {
            message: "event deleted".to_string(),
            status: response.status,
        })
    }

    pub fn parse_list_events(&self, response: HttpResponse) -> Outcome<EventsPage> {
        if response.status != 200 {
            return Err(ApiError::rejected(&response, "could not list events"));
        }
        let body: ListEventsBody = error::decode(&response.body)?;
        Ok(EventsPage {
            events: body.events,
            total: body.total,
            message: body.message.unwrap_or_else(|| "events listed".to_string()),
            status: response.status,
        })
    }

    fn request_headers(&self, with_body: bool) -> Vec<(String, String)> {
        let mut headers = Vec::new();
        if with_body {
            headers.push(json_content_header());
        }
        if let Some(token) = &self.token {
            headers.push(bearer_header(token));
        }
        headers
    }
}

fn to_json(draft: &EventDraft) -> Outcome<String> {
    serde_json::to_string(draft).map_err(|e| ApiError::Unexpected {
        detail: format!("could not serialize request body: {e}"),
    })
}

#[derive(Debug, Default, Deserialize)]
struct CreateEventBody {
    event_id: Option<String>,
    #[serde(default)]
    event: EventRecord,
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ListEventsBody {
    #[serde(default)]
    events: Vec<EventRecord>,
    #[serde(default)]
    total: u64,
    message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn client() -> EventsClient {
        let settings = Settings {
            api_base_url: "http://localhost:3000".to_string(),
            ..Settings::default()
        };
        EventsClient::new(&settings).unwrap().with_token("tok-1")
    }

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
    fn build_create_event_produces_correct_request() {
        let req = client().build_create_event(&draft()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/v1/events");
        assert_eq!(
            req.headers,
            vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("authorization".to_string(), "Bearer tok-1".to_string()),
            ]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Team Meeting");
        assert!(body.get("recurrence_pattern").is_none());
    }

    #[test]
    fn build_get_event_produces_correct_request() {
        let req = client().build_get_event("ev-7");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/v1/events/ev-7");
        assert!(req.body.is_none());
        assert_eq!(
            req.headers,
            vec![("authorization".to_string(), "Bearer tok-1".to_string())]
        );
    }

    #[test]
    fn build_requests_without_token_carry_no_auth_header() {
        let settings = Settings {
            api_base_url: "http://localhost:3000".to_string(),
            ..Settings::default()
        };
        let bare = EventsClient::new(&settings).unwrap();
        let req = bare.build_get_event("ev-7");
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_update_event_produces_correct_request() {
        let req = client().build_update_event("ev-7", &draft()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/v1/events/ev-7");
        assert!(req.body.is_some());
    }

    #[test]
    fn build_delete_event_produces_correct_request() {
        let req = client().build_delete_event("ev-7");
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/api/v1/events/ev-7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_list_events_omits_unset_filters() {
        let req = client().build_list_events(&EventFilter::default());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/v1/events");
        assert!(req.query.is_empty());
    }

    #[test]
    fn build_list_events_includes_set_filters() {
        let filter = EventFilter {
            limit: Some(10),
            offset: Some(20),
            search: Some("meeting".to_string()),
            from: Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()),
            to: None,
        };
        let req = client().build_list_events(&filter);
        assert_eq!(
            req.query,
            vec![
                ("limit".to_string(), "10".to_string()),
                ("offset".to_string(), "20".to_string()),
                ("search".to_string(), "meeting".to_string()),
                ("from".to_string(), "2026-03-01T00:00:00+00:00".to_string()),
            ]
        );
    }

    #[test]
    fn parse_create_event_created() {
        let response = HttpResponse {
            status: 201,
            body: r#"{"event_id":"ev-1","event":{"id":"ev-1","title":"Team Meeting"},"message":"event created"}"#
                .to_string(),
        };
        let created = client().parse_create_event(response).unwrap();
        assert_eq!(created.event_id.as_deref(), Some("ev-1"));
        assert_eq!(created.event.title, "Team Meeting");
        assert_eq!(created.message, "event created");
        assert_eq!(created.status, 201);
    }

    #[test]
    fn parse_create_event_rejected_uses_body_error() {
        let response = HttpResponse {
            status: 400,
            body: r#"{"error":"title is required"}"#.to_string(),
        };
        let err = client().parse_create_event(response).unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 400,
                error: "title is required".to_string(),
                message: None,
            }
        );
    }

    #[test]
    fn parse_get_event_success() {
        let response = HttpResponse {
            status: 200,
            body: r#"{"id":"ev-1","title":"Team Meeting","location":"Conference Room A"}"#
                .to_string(),
        };
        let event = client().parse_get_event(response).unwrap();
        assert_eq!(event.id.as_deref(), Some("ev-1"));
        assert_eq!(event.location, "Conference Room A");
    }

    #[test]
    fn parse_get_event_not_found_regardless_of_body() {
        let response = HttpResponse {
            status: 404,
            body: r#"{"error":"no such row in events table"}"#.to_string(),
        };
        let err = client().parse_get_event(response).unwrap_err();
        assert_eq!(err, ApiError::NotFound { resource: "event" });
        assert_eq!(err.to_string(), "event not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn parse_update_event_not_found() {
        let response = HttpResponse {
            status: 404,
            body: String::new(),
        };
        let err = client().parse_update_event(response).unwrap_err();
        assert_eq!(err, ApiError::NotFound { resource: "event" });
    }

    #[test]
    fn parse_delete_event_success() {
        let response = HttpResponse {
            status: 204,
            body: String::new(),
        };
        let ack = client().parse_delete_event(response).unwrap();
        assert_eq!(ack.message, "event deleted");
        assert_eq!(ack.status, 204);
    }

    #[test]
    fn parse_delete_event_not_found() {
        let response = HttpResponse {
            status: 404,
            body: String::new(),
        };
        let err = client().parse_delete_event(response).unwrap_err();
        assert_eq!(err, ApiError::NotFound { resource: "event" });
    }

    #[test]
    fn parse_delete_event_other_failure_consults_body() {
        let response = HttpResponse {
            status: 403,
            body: r#"{"error":"not your event"}"#.to_string(),
        };
        let err = client().parse_delete_event(response).unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 403,
                error: "not your event".to_string(),
                message: None,
            }
        );
    }

    #[test]
    fn parse_list_events_success() {
        let response = HttpResponse {
            status: 200,
            body: r#"{"events":[{"id":"ev-1","title":"A"},{"id":"ev-2","title":"B"}],"total":2}"#
                .to_string(),
        };
        let page = client().parse_list_events(response).unwrap();
        assert_eq!(page.events.len(), 2);
        assert_eq!(page.total, 2);
        assert_eq!(page.message, "events listed");
        assert_eq!(page.status, 200);
    }

    #[test]
    fn parse_list_events_empty_page() {
        let response = HttpResponse {
            status: 200,
            body: r#"{"events":[],"total":0}"#.to_string(),
        };
        let page = client().parse_list_events(response).unwrap();
        assert!(page.events.is_empty());
        assert_eq!(page.total, 0);
    }

    #[test]
    fn parse_list_events_malformed_body_is_unexpected() {
        let response = HttpResponse {
            status: 200,
            body: "<html></html>".to_string(),
        };
        let err = client().parse_list_events(response).unwrap_err();
        assert!(matches!(err, ApiError::Unexpected { .. }));
    }
}
