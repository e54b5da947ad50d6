//! Synchronous API client for the Skylane travel-booking service, built
//! for its end-to-end test suite.
//!
//! # Overview
//! Two resource clients cover the API surface the suite exercises:
//! [`AuthClient`] for `/api/v1/auth` and [`EventsClient`] for
//! `/api/v1/events`. Every operation returns [`Outcome<T>`]: a typed
//! success payload or a classified [`ApiError`], never a raw transport or
//! serde error.
//!
//! # Design
//! - Request building and response classification are pure functions over
//!   plain-data `HttpRequest` / `HttpResponse` values (`build_*` /
//!   `parse_*`); only [`transport::Transport`] touches the network.
//! - Failures form three tiers: transport (`Timeout`, `Network`),
//!   classified rejections (`NotFound`, `Rejected`), and `Unexpected` for
//!   responses that arrived but could not be used.
//! - Credentials and tokens are constructor or call parameters; no client
//!   mutates headers after construction.
//! - [`testdata`] supplies seeded generators and fixed descriptors so
//!   scenarios are reproducible.

pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod testdata;
pub mod transport;
pub mod types;

pub use auth::AuthClient;
pub use config::Settings;
pub use error::{ApiError, Outcome};
pub use events::EventsClient;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use testdata::TestDataGenerator;
pub use types::{
    Ack, AuthGrant, CreatedEvent, EventDraft, EventFilter, EventRecord, EventsPage, TokenStatus,
    UserAccount, UserProfile,
};
