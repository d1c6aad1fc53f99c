use http::StatusCode;
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::types::ObservedResponse;
use crate::errors::RedirectCheckError;

/// HTTP client that never follows redirects, so the `302` itself can be inspected
pub fn build_client(timeout: Duration) -> Result<Client, RedirectCheckError> {
    Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(timeout)
        .build()
        .map_err(|e| RedirectCheckError::Http(e.to_string()))
}

/// Send one GET request to the login endpoint and capture the raw answer
///
/// The body is only read for non-redirect answers, where it usually explains
/// what went wrong.
pub async fn fetch_authorization_redirect(
    client: &Client,
    url: &Url,
    timeout: Duration,
) -> Result<ObservedResponse, RedirectCheckError> {
    tracing::debug!("Requesting authorization endpoint: {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|e| classify_request_error(&e, url, timeout))?;

    let status = response.status();
    let headers = response.headers().clone();
    tracing::debug!("Authorization endpoint answered with status {}", status);

    let body = if status == StatusCode::FOUND {
        String::new()
    } else {
        match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!("Failed to read response body: {}", e);
                String::new()
            }
        }
    };

    Ok(ObservedResponse {
        url: url.clone(),
        status,
        headers,
        body,
    })
}

fn classify_request_error(
    err: &reqwest::Error,
    url: &Url,
    timeout: Duration,
) -> RedirectCheckError {
    if err.is_timeout() {
        tracing::debug!("Request to {} timed out: {}", url, err);
        RedirectCheckError::Timeout(timeout)
    } else if err.is_connect() {
        tracing::debug!("Connection to {} failed: {}", url, err);
        RedirectCheckError::Connect {
            target: host_and_port(url),
        }
    } else {
        tracing::debug!("Request to {} failed: {}", url, err);
        RedirectCheckError::Http(err.to_string())
    }
}

fn host_and_port(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port_or_known_default() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}
