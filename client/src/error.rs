//! Failure taxonomy for API call outcomes.
//!
//! # Design
//! Every public operation returns [`Outcome<T>`], so success payloads exist
//! only inside `Ok` and failures only inside `Err`. The five `ApiError`
//! variants separate the three failure tiers: transport failures
//! (`Timeout`, `Network`) never saw a status code, classified rejections
//! (`NotFound`, `Rejected`) carry one, and `Unexpected` covers responses
//! that were received but unusable (e.g. malformed JSON on a success
//! status). Callers pattern-match on variants instead of comparing error
//! strings.

use serde::Deserialize;
use thiserror::Error;

use crate::http::HttpResponse;

/// Result of a single API operation.
pub type Outcome<T> = Result<T, ApiError>;

/// Classified failure of an API operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The request did not complete within the configured timeout.
    #[error("connection timeout")]
    Timeout,

    /// The exchange failed below HTTP: DNS, refused connection, broken pipe.
    #[error("network error: {detail}")]
    Network { detail: String },

    /// The server returned 404 for an operation where 404 means
    /// "the resource does not exist" rather than a generic rejection.
    #[error("{resource} not found")]
    NotFound { resource: &'static str },

    /// The server answered with a non-success status. `error` is the
    /// server's `error` field when the body carried one, otherwise the
    /// operation's generic failure text; `message` is the server's
    /// `message` field when present.
    #[error("HTTP {status}: {error}")]
    Rejected {
        status: u16,
        error: String,
        message: Option<String>,
    },

    /// The response was received but could not be used, e.g. a success
    /// status with a body that does not decode.
    #[error("unexpected failure: {detail}")]
    Unexpected { detail: String },
}

impl ApiError {
    /// HTTP status associated with the failure. `None` exactly when no
    /// usable response was received (`Timeout`, `Network`, `Unexpected`).
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Rejected { status, .. } => Some(*status),
            ApiError::Timeout | ApiError::Network { .. } | ApiError::Unexpected { .. } => None,
        }
    }

    /// Rejection that consults the body: the server's `error` field wins
    /// over the operation's fallback text, and `message` is kept when
    /// present. A body that is not JSON is treated as absent.
    pub(crate) fn rejected(response: &HttpResponse, fallback: &str) -> ApiError {
        let body: ErrorBody = serde_json::from_str(&response.body).unwrap_or_default();
        ApiError::Rejected {
            status: response.status,
            error: body.error.unwrap_or_else(|| fallback.to_string()),
            message: body.message,
        }
    }

    /// Rejection with fixed error text; the body is ignored entirely.
    pub(crate) fn rejected_fixed(status: u16, error: &str) -> ApiError {
        ApiError::Rejected {
            status,
            error: error.to_string(),
            message: None,
        }
    }
}

/// Decode a success-status body, mapping serde failures to `Unexpected`.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Outcome<T> {
    serde_json::from_str(body).map_err(|e| ApiError::Unexpected {
        detail: format!("malformed response body: {e}"),
    })
}

/// Error envelope the server uses for rejections.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}
