//! Client for the authentication resource family.
//!
//! # Design
//! `AuthClient` holds no session state: credentials and tokens are per-call
//! parameters, so a test that juggles several users never has to worry
//! about hidden header mutation between steps. Each operation is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that classifies the `HttpResponse`; the public operation composes
//! the two through the transport.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Settings;
use crate::error::{self, ApiError, Outcome};
use crate::http::{bearer_header, json_content_header, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{Ack, AuthGrant, TokenStatus, UserAccount, UserProfile};

/// Synchronous client for `/api/v1/auth`.
///
/// Stateless by design: every operation that needs a credential takes it
/// as a parameter. Construction fails only if the HTTP client itself
/// cannot be built.
#[derive(Debug, Clone)]
pub struct AuthClient {
    base_url: String,
    transport: Transport,
}

impl AuthClient {
    pub fn new(settings: &Settings) -> Outcome<Self> {
        Ok(Self {
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            transport: Transport::new(settings)?,
        })
    }

    /// Authenticate with an email and password, yielding the issued tokens.
    pub fn login(&self, email: &str, password: &str) -> Outcome<AuthGrant> {
        debug!(email, "logging in");
        let request = self.build_login(email, password)?;
        let response = self.transport.execute(&request)?;
        self.parse_login(response)
    }

    /// Authenticate with the credentials of a generated or fixture profile.
    pub fn login_as(&self, profile: &UserProfile) -> Outcome<AuthGrant> {
        self.login(&profile.email, &profile.password)
    }

    /// Invalidate an issued access token.
    pub fn logout(&self, token: &str) -> Outcome<Ack> {
        let request = self.build_logout(token);
        let response = self.transport.execute(&request)?;
        self.parse_logout(response)
    }

    /// Check whether an access token is still accepted by the server.
    pub fn validate_token(&self, token: &str) -> Outcome<TokenStatus> {
        let request = self.build_validate_token(token);
        let response = self.transport.execute(&request)?;
        self.parse_validate_token(response)
    }

    /// Exchange a refresh token for a fresh token pair.
    pub fn refresh_token(&self, refresh_token: &str) -> Outcome<AuthGrant> {
        let request = self.build_refresh_token(refresh_token)?;
        let response = self.transport.execute(&request)?;
        self.parse_refresh_token(response)
    }

    /// Create a new account. Registration does not log the user in.
    pub fn register(&self, profile: &UserProfile) -> Outcome<AuthGrant> {
        debug!(email = %profile.email, "registering user");
        let request = self.build_register(profile)?;
        let response = self.transport.execute(&request)?;
        self.parse_register(response)
    }

    /// Fetch the account details behind an access token.
    pub fn user_account(&self, token: &str) -> Outcome<UserAccount> {
        let request = self.build_user_account(token);
        let response = self.transport.execute(&request)?;
        self.parse_user_account(response)
    }

    pub fn build_login(&self, email: &str, password: &str) -> Outcome<HttpRequest> {
        let body = to_json(&Credentials { email, password })?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/v1/auth/login", self.base_url),
            query: Vec::new(),
            headers: vec![json_content_header()],
            body: Some(body),
        })
    }

    pub fn build_logout(&self, token: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/v1/auth/logout", self.base_url),
            query: Vec::new(),
            headers: vec![bearer_header(token)],
            body: None,
        }
    }

    pub fn build_validate_token(&self, token: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/v1/auth/validate", self.base_url),
            query: Vec::new(),
            headers: vec![bearer_header(token)],
            body: None,
        }
    }

    pub fn build_refresh_token(&self, refresh_token: &str) -> Outcome<HttpRequest> {
        let body = to_json(&RefreshRequest { refresh_token })?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/v1/auth/refresh", self.base_url),
            query: Vec::new(),
            headers: vec![json_content_header()],
            body: Some(body),
        })
    }

    pub fn build_register(&self, profile: &UserProfile) -> Outcome<HttpRequest> {
        let body = to_json(profile)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/api/v1/auth/register", self.base_url),
            query: Vec::new(),
            headers: vec![json_content_header()],
            body: Some(body),
        })
    }

    pub fn build_user_account(&self, token: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/api/v1/auth/user", self.base_url),
            query: Vec::new(),
            headers: vec![bearer_header(token)],
            body: None,
        }
    }

    pub fn parse_login(&self, response: HttpResponse) -> Outcome<AuthGrant> {
        if response.status != 200 {
            return Err(ApiError::rejected(&response, "login failed"));
        }
        let body: AuthBody = error::decode(&response.body)?;
        Ok(AuthGrant {
            token: body.token,
            refresh_token: body.refresh_token,
            user_id: body.user_id,
            message: body
                .message
                .unwrap_or_else(|| "login successful".to_string()),
            status: response.status,
        })
    }

    // Logout responses carry nothing the suite acts on, so the body is
    // ignored on both success and failure.
    pub fn parse_logout(&self, response: HttpResponse) -> Outcome<Ack> {
        if response.status != 200 {
            return Err(ApiError::rejected_fixed(response.status, "logout failed"));
        }
        Ok(Ack {
            message: "logout successful".to_string(),
            status: response.status,
        })
    }

    pub fn parse_validate_token(&self, response: HttpResponse) -> Outcome<TokenStatus> {
        if response.status != 200 {
            return Err(ApiError::rejected_fixed(response.status, "token is invalid"));
        }
        let body: AuthBody = error::decode(&response.body)?;
        Ok(TokenStatus {
            user_id: body.user_id,
            message: "token is valid".to_string(),
            status: response.status,
        })
    }

    pub fn parse_refresh_token(&self, response: HttpResponse) -> Outcome<AuthGrant> {
        if response.status != 200 {
            return Err(ApiError::rejected_fixed(
                response.status,
                "token refresh failed",
            ));
        }
        let body: AuthBody = error::decode(&response.body)?;
        Ok(AuthGrant {
            token: body.token,
            refresh_token: body.refresh_token,
            user_id: body.user_id,
            message: "token refreshed".to_string(),
            status: response.status,
        })
    }

    pub fn parse_register(&self, response: HttpResponse) -> Outcome<AuthGrant> {
        if response.status != 201 {
            return Err(ApiError::rejected(&response, "registration failed"));
        }
        let body: AuthBody = error::decode(&response.body)?;
        Ok(AuthGrant {
            token: body.token,
            refresh_token: body.refresh_token,
            user_id: body.user_id,
            message: "registration successful".to_string(),
            status: response.status,
        })
    }

    pub fn parse_user_account(&self, response: HttpResponse) -> Outcome<UserAccount> {
        if response.status != 200 {
            return Err(ApiError::rejected(&response, "could not fetch account"));
        }
        let body: AccountBody = error::decode(&response.body)?;
        Ok(UserAccount {
            user_id: body.user_id,
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            phone: body.phone,
            status: response.status,
        })
    }
}

fn to_json<T: Serialize>(value: &T) -> Outcome<String> {
    serde_json::to_string(value).map_err(|e| ApiError::Unexpected {
        detail: format!("could not serialize request body: {e}"),
    })
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct AuthBody {
    token: Option<String>,
    refresh_token: Option<String>,
    user_id: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AccountBody {
    user_id: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    phone: Option<String>,
}
