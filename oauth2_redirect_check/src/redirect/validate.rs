use http::{StatusCode, header::LOCATION};

use super::types::{ObservedResponse, ParamReport, ParamStatus, RedirectAnalysis, RedirectTarget};
use crate::config::RedirectCheckConfig;
use crate::errors::RedirectCheckError;

/// Only `302 Found` counts as an authorization redirect
pub(crate) fn require_found(observed: &ObservedResponse) -> Result<(), RedirectCheckError> {
    if observed.status == StatusCode::FOUND {
        return Ok(());
    }

    tracing::debug!("Expected 302 redirect, got {}", observed.status);
    Err(RedirectCheckError::UnexpectedStatus {
        status: observed.status,
        body: observed.body.clone(),
    })
}

/// Raw `Location` header of a redirect
pub(crate) fn location_header(observed: &ObservedResponse) -> Result<String, RedirectCheckError> {
    let value = observed
        .headers
        .get(LOCATION)
        .ok_or(RedirectCheckError::MissingLocation)?;

    value
        .to_str()
        .map(str::to_string)
        .map_err(|e| RedirectCheckError::InvalidLocation(e.to_string()))
}

/// Check a redirect target against the expected host and parameters
///
/// Every expected parameter is reported independently; a missing one never
/// stops the others from being looked at.
pub fn analyze_redirect(
    target: RedirectTarget,
    config: &RedirectCheckConfig,
) -> RedirectAnalysis {
    let params = config
        .expected_params
        .iter()
        .map(|name| ParamReport {
            name: name.clone(),
            status: match target.param(name) {
                Some(value) => ParamStatus::Present(value.to_string()),
                None => ParamStatus::Missing,
            },
        })
        .collect();

    let host_matches = target.host.contains(config.expected_host.as_str());

    RedirectAnalysis {
        target,
        params,
        host_matches,
    }
}

/// Decide pass or fail for an analyzed redirect
///
/// The host decides the outcome. Missing parameters only fail the check when
/// `require_all_params` is set.
pub(crate) fn verdict(
    analysis: &RedirectAnalysis,
    config: &RedirectCheckConfig,
) -> Result<(), RedirectCheckError> {
    if !analysis.host_matches {
        return Err(RedirectCheckError::HostMismatch {
            expected: config.expected_host.clone(),
            actual: analysis.target.host.clone(),
        });
    }

    let missing = analysis.missing_params();
    if !missing.is_empty() {
        tracing::debug!("Redirect is missing parameters: {}", missing.join(", "));
        if config.require_all_params {
            return Err(RedirectCheckError::MissingParameters(missing));
        }
    }

    Ok(())
}
