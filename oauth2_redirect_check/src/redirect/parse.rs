use std::collections::HashMap;
use url::Url;

use super::types::RedirectTarget;
use crate::errors::RedirectCheckError;

/// Decompose a `Location` header value into scheme, host, path and query
///
/// Relative locations are resolved against the URL that was requested, the
/// same way a browser would follow them.
pub fn parse_redirect_target(
    location: &str,
    request_url: &Url,
) -> Result<RedirectTarget, RedirectCheckError> {
    let url = request_url
        .join(location)
        .map_err(|e| RedirectCheckError::InvalidLocation(format!("{location}: {e}")))?;

    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    };

    tracing::debug!("Redirect target host: {}, path: {}", host, url.path());

    Ok(RedirectTarget {
        raw: location.to_string(),
        scheme: url.scheme().to_string(),
        host,
        path: url.path().to_string(),
        query: first_value_query_map(&url),
    })
}

/// Map each query parameter name to the first value it appears with
///
/// Values are form-urlencoded decoded. Parameters whose value is empty are
/// left out, so `scope=` counts as a missing `scope`.
pub fn first_value_query_map(url: &Url) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in url.query_pairs() {
        if value.is_empty() {
            continue;
        }
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}
