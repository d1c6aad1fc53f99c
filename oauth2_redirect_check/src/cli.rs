use clap::{Parser, builder::BoolishValueParser};
use std::time::Duration;

use crate::config::{
    DEFAULT_BASE_URL, DEFAULT_ENDPOINT, DEFAULT_EXPECTED_HOST, DEFAULT_EXPECTED_PARAMS,
    DEFAULT_TIMEOUT, RedirectCheckConfig,
};

/// Check that an OAuth2 login endpoint redirects to the identity provider.
///
/// With no arguments, checks the Kakao login endpoint of an application
/// running on localhost:8080.
#[derive(Debug, Parser)]
#[command(name = "oauth2-redirect-check", version, about)]
pub struct Cli {
    /// Root URL of the application under test
    #[arg(long, env = "OAUTH2_CHECK_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Path of the login endpoint
    #[arg(long, env = "OAUTH2_CHECK_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Substring the redirect target's host must contain
    #[arg(long, env = "OAUTH2_CHECK_EXPECTED_HOST", default_value = DEFAULT_EXPECTED_HOST)]
    pub expected_host: String,

    /// Comma-separated query parameters to report on
    #[arg(
        long,
        env = "OAUTH2_CHECK_EXPECTED_PARAMS",
        value_delimiter = ',',
        default_values_t = DEFAULT_EXPECTED_PARAMS.map(String::from)
    )]
    pub expected_params: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, env = "OAUTH2_CHECK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT.as_secs())]
    pub timeout_secs: u64,

    /// Fail when any expected parameter is missing
    #[arg(
        long,
        env = "OAUTH2_CHECK_REQUIRE_ALL_PARAMS",
        value_parser = BoolishValueParser::new()
    )]
    pub require_all_params: bool,
}

impl Cli {
    pub fn into_config(self) -> RedirectCheckConfig {
        RedirectCheckConfig {
            base_url: self.base_url,
            endpoint: self.endpoint,
            expected_host: self.expected_host,
            expected_params: self
                .expected_params
                .into_iter()
                .map(|name| name.trim().to_string())
                .collect(),
            timeout: Duration::from_secs(self.timeout_secs),
            require_all_params: self.require_all_params,
        }
    }
}
