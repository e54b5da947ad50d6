//! Plain-data HTTP request and response types.
//!
//! # Design
//! These types describe HTTP exchanges as plain data. The request builders
//! produce `HttpRequest` values and the response parsers consume
//! `HttpResponse` values without ever touching the network — only the
//! transport executes I/O. This separation keeps outcome classification
//! deterministic: any parser can be driven from a literal response in a
//! test, no server required.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// An HTTP request described as plain data.
///
/// Built by the `build_*` methods on [`crate::AuthClient`] and
/// [`crate::EventsClient`]. `path` is the full URL without the query
/// string; `query` pairs are appended and percent-encoded by the
/// transport at send time.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Produced by the transport after executing an `HttpRequest`, then handed
/// to a `parse_*` method for outcome classification. Only the status code
/// and the body take part in classification.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Bearer authorization header pair for an issued token.
pub(crate) fn bearer_header(token: &str) -> (String, String) {
    ("authorization".to_string(), format!("Bearer {token}"))
}

/// Content-type header pair for JSON request bodies.
pub(crate) fn json_content_header() -> (String, String) {
    ("content-type".to_string(), "application/json".to_string())
}
