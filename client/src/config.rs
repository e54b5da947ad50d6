//! Suite configuration sourced from environment variables.

/// Settings for a test run against a Skylane deployment.
///
/// All fields have defaults suitable for running against the in-process
/// mock; point `SKYLANE_API_URL` at a real deployment to run the suite
/// against it.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the API under test (default: `https://api.skylane.example`).
    pub api_base_url: String,
    /// Per-request timeout in seconds (default: `10`).
    pub api_timeout_secs: u64,
    /// Retry count declared for runner-level tooling (default: `3`).
    /// The client itself never retries; a timed-out call fails with
    /// `ApiError::Timeout` and the decision to rerun belongs to the runner.
    pub api_retries: u32,
    /// Email of the standing test account (default: `test@example.com`).
    pub test_email: String,
    /// Password of the standing test account (default: `Test123!`).
    pub test_password: String,
}

impl Settings {
    /// Load settings from environment variables with defaults.
    ///
    /// | Env Var                    | Default                       |
    /// |----------------------------|-------------------------------|
    /// | `SKYLANE_API_URL`          | `https://api.skylane.example` |
    /// | `SKYLANE_API_TIMEOUT_SECS` | `10`                          |
    /// | `SKYLANE_API_RETRIES`      | `3`                           |
    /// | `SKYLANE_TEST_EMAIL`       | `test@example.com`            |
    /// | `SKYLANE_TEST_PASSWORD`    | `Test123!`                    |
    pub fn from_env() -> Self {
        let api_base_url =
            std::env::var("SKYLANE_API_URL").unwrap_or_else(|_| "https://api.skylane.example".into());

        let api_timeout_secs: u64 = std::env::var("SKYLANE_API_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("SKYLANE_API_TIMEOUT_SECS must be a valid u64");

        let api_retries: u32 = std::env::var("SKYLANE_API_RETRIES")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("SKYLANE_API_RETRIES must be a valid u32");

        let test_email =
            std::env::var("SKYLANE_TEST_EMAIL").unwrap_or_else(|_| "test@example.com".into());

        let test_password =
            std::env::var("SKYLANE_TEST_PASSWORD").unwrap_or_else(|_| "Test123!".into());

        Self {
            api_base_url,
            api_timeout_secs,
            api_retries,
            test_email,
            test_password,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.skylane.example".to_string(),
            api_timeout_secs: 10,
            api_retries: 3,
            test_email: "test@example.com".to_string(),
            test_password: "Test123!".to_string(),
        }
    }
}
