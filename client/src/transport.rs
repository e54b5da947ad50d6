//! Blocking HTTP transport over a pooled session.
//!
//! # Design
//! `Transport` wraps a `reqwest::blocking::Client` configured once from
//! `Settings`: fixed per-request timeout, `accept: application/json`, and a
//! user agent identifying the QA suite. It is the only place in the crate
//! that performs network I/O. Transport-tier failures are classified here
//! (timeout vs. everything else); status-code classification belongs to
//! the `parse_*` methods that consume the returned `HttpResponse`.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use tracing::debug;

use crate::config::Settings;
use crate::error::{ApiError, Outcome};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const AGENT: &str = concat!("skylane-qa/", env!("CARGO_PKG_VERSION"));

/// Executes plain-data requests against the configured deployment.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
}

impl Transport {
    pub fn new(settings: &Settings) -> Outcome<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.api_timeout_secs))
            .user_agent(AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::Unexpected {
                detail: format!("could not build HTTP client: {e}"),
            })?;

        Ok(Self { http })
    }

    /// Execute one request and return the raw status and body.
    ///
    /// Non-2xx statuses are data, not errors; only failures below HTTP
    /// (timeout, refused connection, broken transfer) produce an `Err`.
    pub fn execute(&self, request: &HttpRequest) -> Outcome<HttpResponse> {
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&request.path),
            HttpMethod::Post => self.http.post(&request.path),
            HttpMethod::Put => self.http.put(&request.path),
            HttpMethod::Delete => self.http.delete(&request.path),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        debug!(method = %request.method, path = %request.path, "sending request");
        let response = builder.send().map_err(classify)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(classify)?;
        debug!(method = %request.method, path = %request.path, status, "received response");

        Ok(HttpResponse { status, body })
    }
}

fn classify(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network {
            detail: err.to_string(),
        }
    }
}
