//! Configuration for a single redirect check

use std::time::Duration;
use url::Url;

use crate::errors::RedirectCheckError;

/// Root URL of the application under test
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Login endpoint that starts the Kakao authorization flow
pub const DEFAULT_ENDPOINT: &str = "/oauth2/auth/kakao";

/// Host fragment the authorization redirect must point at
pub const DEFAULT_EXPECTED_HOST: &str = "kauth.kakao.com";

/// Query parameters an authorization request is expected to carry, in report order
pub const DEFAULT_EXPECTED_PARAMS: [&str; 5] =
    ["response_type", "client_id", "scope", "state", "redirect_uri"];

/// Upper bound for connecting to the application and receiving its answer
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Everything a check needs to know about the endpoint and the redirect it should produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectCheckConfig {
    /// Scheme, host and port of the application, e.g. `http://localhost:8080`
    pub base_url: String,
    /// Path of the login endpoint under the base URL
    pub endpoint: String,
    /// Substring that the redirect target's host must contain
    pub expected_host: String,
    /// Parameter names reported for the redirect target, in order
    pub expected_params: Vec<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Fail the check when any expected parameter is missing.
    /// Off by default: missing parameters are only reported.
    pub require_all_params: bool,
}

impl Default for RedirectCheckConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            expected_host: DEFAULT_EXPECTED_HOST.to_string(),
            expected_params: DEFAULT_EXPECTED_PARAMS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            timeout: DEFAULT_TIMEOUT,
            require_all_params: false,
        }
    }
}

impl RedirectCheckConfig {
    /// Full URL of the endpoint under test
    ///
    /// A trailing `/` on the base URL and a missing leading `/` on the endpoint
    /// are tolerated so that `http://host/` + `oauth2/auth/kakao` still works.
    pub fn target_url(&self) -> Result<Url, RedirectCheckError> {
        let base = self.base_url.trim_end_matches('/');
        let endpoint = if self.endpoint.starts_with('/') {
            self.endpoint.clone()
        } else {
            format!("/{}", self.endpoint)
        };

        let joined = format!("{base}{endpoint}");
        Url::parse(&joined)
            .map_err(|e| RedirectCheckError::Config(format!("Invalid target URL {joined}: {e}")))
    }

    /// Reject configurations that could never produce a meaningful check
    pub fn validate(&self) -> Result<(), RedirectCheckError> {
        let url = self.target_url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(RedirectCheckError::Config(format!(
                "Unsupported scheme for base URL: {}",
                url.scheme()
            )));
        }

        if self.expected_host.trim().is_empty() {
            return Err(RedirectCheckError::Config(
                "Expected host must not be empty".to_string(),
            ));
        }

        if let Some(position) = self
            .expected_params
            .iter()
            .position(|name| name.trim().is_empty())
        {
            return Err(RedirectCheckError::Config(format!(
                "Expected parameter #{} has an empty name",
                position + 1
            )));
        }

        if self.timeout.is_zero() {
            return Err(RedirectCheckError::Config(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
