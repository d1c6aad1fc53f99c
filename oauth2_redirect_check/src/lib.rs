//! oauth2_redirect_check - Authorization redirect checker for OAuth2 login endpoints
//!
//! This crate issues a single request to an application's OAuth2 login endpoint,
//! captures the redirect it answers with, and reports whether the redirect
//! targets the expected identity provider with the expected query parameters.

mod check;
mod cli;
mod config;
mod errors;
mod redirect;
mod report;

pub use check::{CheckOutcome, run_check};
pub use cli::Cli;
pub use config::{
    DEFAULT_BASE_URL, DEFAULT_ENDPOINT, DEFAULT_EXPECTED_HOST, DEFAULT_EXPECTED_PARAMS,
    DEFAULT_TIMEOUT, RedirectCheckConfig,
};
pub use errors::RedirectCheckError;
pub use redirect::{
    ObservedResponse, ParamReport, ParamStatus, RedirectAnalysis, RedirectTarget,
    analyze_redirect, build_client, fetch_authorization_redirect, first_value_query_map,
    parse_redirect_target,
};
pub use report::Reporter;
