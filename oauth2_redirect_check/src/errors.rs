use http::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Reasons a redirect check fails
///
/// Every variant ends the check with a failing exit status; none is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RedirectCheckError {
    /// The application could not be reached at all
    #[error("Cannot connect to the application. Make sure it's running on {target}")]
    Connect { target: String },

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered, but not with `302 Found`
    #[error("Expected 302 redirect, got {}", .status.as_u16())]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("Redirect response but no Location header")]
    MissingLocation,

    #[error("Invalid Location header: {0}")]
    InvalidLocation(String),

    /// The redirect points somewhere other than the identity provider
    #[error("Not redirecting to {expected} (redirecting to {actual})")]
    HostMismatch { expected: String, actual: String },

    /// Only raised when every expected parameter is required
    #[error("Missing expected parameters: {}", .0.join(", "))]
    MissingParameters(Vec<String>),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to write report: {0}")]
    Output(String),
}

impl From<std::io::Error> for RedirectCheckError {
    fn from(err: std::io::Error) -> Self {
        Self::Output(err.to_string())
    }
}
