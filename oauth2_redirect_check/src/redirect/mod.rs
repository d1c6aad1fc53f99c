mod client;
mod parse;
mod types;
mod validate;

pub use client::{build_client, fetch_authorization_redirect};
pub use parse::{first_value_query_map, parse_redirect_target};
pub use types::{ObservedResponse, ParamReport, ParamStatus, RedirectAnalysis, RedirectTarget};
pub use validate::analyze_redirect;

pub(crate) use validate::{location_header, require_found, verdict};
