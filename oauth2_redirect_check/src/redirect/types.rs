use http::{HeaderMap, StatusCode};
use std::collections::HashMap;
use url::Url;

/// What the endpoint answered, captured without following any redirect
#[derive(Debug, Clone)]
pub struct ObservedResponse {
    /// URL the request was sent to
    pub url: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Response body; left empty for redirects
    pub body: String,
}

/// A `Location` header decomposed into the parts the check looks at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    /// Location exactly as received
    pub raw: String,
    pub scheme: String,
    /// `host[:port]`, the port only when it differs from the scheme default
    pub host: String,
    pub path: String,
    /// Query parameter name to its first non-empty value
    pub query: HashMap<String, String>,
}

impl RedirectTarget {
    /// First value of a query parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamStatus {
    Present(String),
    Missing,
}

/// Presence of a single expected parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamReport {
    pub name: String,
    pub status: ParamStatus,
}

impl ParamReport {
    pub fn is_present(&self) -> bool {
        matches!(self.status, ParamStatus::Present(_))
    }
}

/// Result of inspecting a redirect target against the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectAnalysis {
    pub target: RedirectTarget,
    /// One entry per expected parameter, in configured order
    pub params: Vec<ParamReport>,
    /// Whether the target host contains the expected host substring
    pub host_matches: bool,
}

impl RedirectAnalysis {
    /// Names of the expected parameters that were not found
    pub fn missing_params(&self) -> Vec<String> {
        self.params
            .iter()
            .filter(|report| !report.is_present())
            .map(|report| report.name.clone())
            .collect()
    }
}
