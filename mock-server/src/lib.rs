use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: String,
    pub reminder_minutes: u32,
    pub is_recurring: bool,
    pub recurrence_pattern: Option<String>,
    #[serde(skip)]
    owner: Uuid,
}

#[derive(Clone, Debug)]
struct User {
    id: Uuid,
    email: String,
    password: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    users: HashMap<String, User>,
    sessions: HashMap<String, Uuid>,
    refresh_tokens: HashMap<String, Uuid>,
    events: HashMap<Uuid, Event>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Deserialize)]
pub struct EventPayload {
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

#[derive(Deserialize)]
pub struct ListParams {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub search: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Serialize)]
struct RegisterResponse {
    user_id: Uuid,
    message: &'static str,
}

#[derive(Serialize)]
struct TokenPairResponse {
    token: String,
    refresh_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<Uuid>,
    message: &'static str,
}

#[derive(Serialize)]
struct MessageResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct ValidateResponse {
    user_id: Uuid,
    message: &'static str,
}

#[derive(Serialize)]
struct AccountResponse {
    user_id: Uuid,
    email: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
}

#[derive(Serialize)]
struct CreateEventResponse {
    event_id: Uuid,
    event: Event,
    message: &'static str,
}

#[derive(Serialize)]
struct EventsListResponse {
    events: Vec<Event>,
    total: usize,
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/auth/validate", get(validate))
        .route("/api/v1/auth/refresh", post(refresh))
        .route("/api/v1/auth/user", get(user_account))
        .route("/api/v1/events", get(list_events).post(create_event))
        .route(
            "/api/v1/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn register(State(db): State<Db>, Json(input): Json<RegisterRequest>) -> Response {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return reject(StatusCode::BAD_REQUEST, "email and password are required");
    }
    let mut store = db.write().await;
    if store.users.contains_key(&input.email) {
        return reject(StatusCode::CONFLICT, "email already registered");
    }
    let user = User {
        id: Uuid::new_v4(),
        email: input.email.clone(),
        password: input.password,
        first_name: input.first_name,
        last_name: input.last_name,
        phone: input.phone,
    };
    let user_id = user.id;
    store.users.insert(input.email, user);
    debug!(%user_id, "registered user");
    (
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id,
            message: "registration successful",
        }),
    )
        .into_response()
}

async fn login(State(db): State<Db>, Json(input): Json<LoginRequest>) -> Response {
    let mut store = db.write().await;
    let Some(user) = store.users.get(&input.email) else {
        return reject(StatusCode::UNAUTHORIZED, "invalid email or password");
    };
    if user.password != input.password {
        return reject(StatusCode::UNAUTHORIZED, "invalid email or password");
    }
    let user_id = user.id;
    let token = Uuid::new_v4().to_string();
    let refresh_token = Uuid::new_v4().to_string();
    store.sessions.insert(token.clone(), user_id);
    store.refresh_tokens.insert(refresh_token.clone(), user_id);
    (
        StatusCode::OK,
        Json(TokenPairResponse {
            token,
            refresh_token,
            user_id: Some(user_id),
            message: "login successful",
        }),
    )
        .into_response()
}

async fn logout(State(db): State<Db>, headers: HeaderMap) -> Response {
    let Some(token) = bearer_token(&headers) else {
        return reject(StatusCode::UNAUTHORIZED, "authentication required");
    };
    let mut store = db.write().await;
    if store.sessions.remove(&token).is_none() {
        return reject(StatusCode::UNAUTHORIZED, "authentication required");
    }
    (
        StatusCode::OK,
        Json(MessageResponse {
            message: "logout successful",
        }),
    )
        .into_response()
}

async fn validate(State(db): State<Db>, headers: HeaderMap) -> Response {
    match authenticate(&db, &headers).await {
        Some(user_id) => (
            StatusCode::OK,
            Json(ValidateResponse {
                user_id,
                message: "token is valid",
            }),
        )
            .into_response(),
        None => reject(StatusCode::UNAUTHORIZED, "authentication required"),
    }
}

// Refresh rotates the pair: the presented refresh token is spent even
// though previously issued access tokens stay valid until logout.
async fn refresh(State(db): State<Db>, Json(input): Json<RefreshRequest>) -> Response {
    let mut store = db.write().await;
    let Some(user_id) = store.refresh_tokens.remove(&input.refresh_token) else {
        return reject(StatusCode::UNAUTHORIZED, "invalid refresh token");
    };
    let token = Uuid::new_v4().to_string();
    let refresh_token = Uuid::new_v4().to_string();
    store.sessions.insert(token.clone(), user_id);
    store.refresh_tokens.insert(refresh_token.clone(), user_id);
    (
        StatusCode::OK,
        Json(TokenPairResponse {
            token,
            refresh_token,
            user_id: None,
            message: "token refreshed",
        }),
    )
        .into_response()
}

async fn user_account(State(db): State<Db>, headers: HeaderMap) -> Response {
    let Some(user_id) = authenticate(&db, &headers).await else {
        return reject(StatusCode::UNAUTHORIZED, "authentication required");
    };
    let store = db.read().await;
    let Some(user) = store.users.values().find(|u| u.id == user_id) else {
        return reject(StatusCode::UNAUTHORIZED, "authentication required");
    };
    (
        StatusCode::OK,
        Json(AccountResponse {
            user_id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
        }),
    )
        .into_response()
}

async fn create_event(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<EventPayload>,
) -> Response {
    let Some(owner) = authenticate(&db, &headers).await else {
        return reject(StatusCode::UNAUTHORIZED, "authentication required");
    };
    if input.title.trim().is_empty() {
        return reject(StatusCode::BAD_REQUEST, "title is required");
    }
    let event = Event {
        id: Uuid::new_v4(),
        title: input.title,
        description: input.description,
        start_date: input.start_date,
        end_date: input.end_date,
        location: input.location,
        reminder_minutes: input.reminder_minutes,
        is_recurring: input.is_recurring,
        recurrence_pattern: input.recurrence_pattern,
        owner,
    };
    db.write().await.events.insert(event.id, event.clone());
    (
        StatusCode::CREATED,
        Json(CreateEventResponse {
            event_id: event.id,
            event,
            message: "event created",
        }),
    )
        .into_response()
}

async fn get_event(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    let Some(owner) = authenticate(&db, &headers).await else {
        return reject(StatusCode::UNAUTHORIZED, "authentication required");
    };
    let store = db.read().await;
    match store.events.get(&id) {
        Some(event) if event.owner == owner => {
            (StatusCode::OK, Json(event.clone())).into_response()
        }
        _ => reject(StatusCode::NOT_FOUND, "event not found"),
    }
}

async fn update_event(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(input): Json<EventPayload>,
) -> Response {
    let Some(owner) = authenticate(&db, &headers).await else {
        return reject(StatusCode::UNAUTHORIZED, "authentication required");
    };
    if input.title.trim().is_empty() {
        return reject(StatusCode::BAD_REQUEST, "title is required");
    }
    let mut store = db.write().await;
    match store.events.get_mut(&id) {
        Some(event) if event.owner == owner => {
            event.title = input.title;
            event.description = input.description;
            event.start_date = input.start_date;
            event.end_date = input.end_date;
            event.location = input.location;
            event.reminder_minutes = input.reminder_minutes;
            event.is_recurring = input.is_recurring;
            event.recurrence_pattern = input.recurrence_pattern;
            (StatusCode::OK, Json(event.clone())).into_response()
        }
        _ => reject(StatusCode::NOT_FOUND, "event not found"),
    }
}

async fn delete_event(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Response {
    let Some(owner) = authenticate(&db, &headers).await else {
        return reject(StatusCode::UNAUTHORIZED, "authentication required");
    };
    let mut store = db.write().await;
    match store.events.get(&id) {
        Some(event) if event.owner == owner => {
            store.events.remove(&id);
            StatusCode::NO_CONTENT.into_response()
        }
        _ => reject(StatusCode::NOT_FOUND, "event not found"),
    }
}

async fn list_events(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<ListParams>,
) -> Response {
    let Some(owner) = authenticate(&db, &headers).await else {
        return reject(StatusCode::UNAUTHORIZED, "authentication required");
    };
    let store = db.read().await;
    let mut matches: Vec<Event> = store
        .events
        .values()
        .filter(|event| event.owner == owner)
        .filter(|event| match &params.search {
            Some(needle) => event.title.to_lowercase().contains(&needle.to_lowercase()),
            None => true,
        })
        .filter(|event| within_bounds(event.start_date, params.from, params.to))
        .cloned()
        .collect();
    matches.sort_by(|a, b| (a.start_date, a.id).cmp(&(b.start_date, b.id)));

    // total counts every match; limit and offset only shape the page.
    let total = matches.len();
    let offset = params.offset.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let events: Vec<Event> = matches.into_iter().skip(offset).take(limit).collect();
    (StatusCode::OK, Json(EventsListResponse { events, total })).into_response()
}

async fn authenticate(db: &Db, headers: &HeaderMap) -> Option<Uuid> {
    let token = bearer_token(headers)?;
    db.read().await.sessions.get(&token).copied()
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_string)
}

fn within_bounds(
    start: Option<DateTime<Utc>>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    // Date-bounded queries only ever match scheduled events.
    let Some(start) = start else { return false };
    if let Some(from) = from {
        if start < from {
            return false;
        }
    }
    if let Some(to) = to {
        if start > to {
            return false;
        }
    }
    true
}

fn reject(status: StatusCode, reason: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: reason.to_string(),
        }),
    )
        .into_response()
}
