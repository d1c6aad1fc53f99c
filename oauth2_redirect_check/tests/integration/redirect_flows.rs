use crate::common::{
    FOREIGN_AUTHORIZE_LOCATION, KAKAO_AUTHORIZE_LOCATION, MockApp, MockReply,
    PARTIAL_AUTHORIZE_LOCATION, config_for, run_captured, unused_base_url,
};
use axum::http::StatusCode;
use oauth2_redirect_check::{CheckOutcome, RedirectCheckConfig};
use std::time::Duration;

/// Test the redirect checker against a mocked application
///
/// Every scenario starts its own mock application so the tests are independent:
/// - Correct Kakao redirect passes
/// - Wrong host, wrong status, missing Location and unreachable app fail
/// - Missing parameters are reported without changing the outcome
#[tokio::test]
async fn test_kakao_redirect_passes() -> Result<(), Box<dyn std::error::Error>> {
    let app = MockApp::start(MockReply::Redirect(KAKAO_AUTHORIZE_LOCATION.to_string())).await?;
    let (outcome, report) = run_captured(&config_for(&app.base_url)).await;

    assert_eq!(outcome, CheckOutcome::Passed);
    assert_eq!(outcome.code(), 0);
    assert!(report.contains("Response Status Code: 302"));
    assert!(report.contains(&format!("Redirect Location: {KAKAO_AUTHORIZE_LOCATION}")));
    assert!(report.contains("Scheme: https\n"));
    assert!(report.contains("Host: kauth.kakao.com\n"));
    assert!(report.contains("Path: /oauth/authorize\n"));
    assert!(report.contains("  ✓ response_type: code\n"));
    assert!(report.contains("  ✓ client_id: abc\n"));
    assert!(report.contains("  ✓ scope: profile\n"));
    assert!(report.contains("  ✓ state: xyz\n"));
    assert!(report.contains("  ✓ redirect_uri: http://localhost/cb\n"));
    assert!(!report.contains("MISSING"));
    assert!(
        report.contains("✓ SUCCESS: Correctly redirecting to kauth.kakao.com authorization server")
    );
    assert!(report.contains("🎉 Test PASSED"));

    app.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_foreign_host_fails_despite_all_params() -> Result<(), Box<dyn std::error::Error>> {
    let app =
        MockApp::start(MockReply::Redirect(FOREIGN_AUTHORIZE_LOCATION.to_string())).await?;
    let (outcome, report) = run_captured(&config_for(&app.base_url)).await;

    assert_eq!(outcome, CheckOutcome::Failed);
    assert_eq!(outcome.code(), 1);
    assert!(!report.contains("MISSING"));
    assert!(report.contains("  ✓ state: xyz\n"));
    assert!(report.contains(
        "✗ ERROR: Not redirecting to kauth.kakao.com (redirecting to notkakao.example.com)"
    ));
    assert!(report.contains("❌ Test FAILED"));

    app.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_ok_status_fails_and_prints_body() -> Result<(), Box<dyn std::error::Error>> {
    let app = MockApp::start(MockReply::Status(
        StatusCode::OK,
        "<html>Login with Kakao</html>".to_string(),
    ))
    .await?;
    let (outcome, report) = run_captured(&config_for(&app.base_url)).await;

    assert_eq!(outcome, CheckOutcome::Failed);
    assert!(report.contains("Response Status Code: 200"));
    assert!(report.contains("✗ ERROR: Expected 302 redirect, got 200"));
    assert!(report.contains("Response body: <html>Login with Kakao</html>"));
    assert!(!report.contains("Redirect URL Analysis"));

    app.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_server_error_fails() -> Result<(), Box<dyn std::error::Error>> {
    let app = MockApp::start(MockReply::Status(
        StatusCode::INTERNAL_SERVER_ERROR,
        "client registration not found".to_string(),
    ))
    .await?;
    let (outcome, report) = run_captured(&config_for(&app.base_url)).await;

    assert_eq!(outcome, CheckOutcome::Failed);
    assert!(report.contains("✗ ERROR: Expected 302 redirect, got 500"));
    assert!(report.contains("Response body: client registration not found"));

    app.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_unknown_endpoint_fails_with_404() -> Result<(), Box<dyn std::error::Error>> {
    let app = MockApp::start(MockReply::Redirect(KAKAO_AUTHORIZE_LOCATION.to_string())).await?;
    let config = RedirectCheckConfig {
        endpoint: "/oauth2/auth/naver".to_string(),
        ..config_for(&app.base_url)
    };
    let (outcome, report) = run_captured(&config).await;

    assert_eq!(outcome, CheckOutcome::Failed);
    assert!(report.contains("✗ ERROR: Expected 302 redirect, got 404"));
    assert!(!report.contains("Response body"));
    assert_eq!(app.hits(), 0);

    app.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_redirect_without_location_fails() -> Result<(), Box<dyn std::error::Error>> {
    let app = MockApp::start(MockReply::RedirectWithoutLocation).await?;
    let (outcome, report) = run_captured(&config_for(&app.base_url)).await;

    assert_eq!(outcome, CheckOutcome::Failed);
    assert!(report.contains("Response Status Code: 302"));
    assert!(report.contains("✗ ERROR: Redirect response but no Location header"));
    assert!(!report.contains("Redirect URL Analysis"));

    app.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_unparsable_location_is_still_reported() -> Result<(), Box<dyn std::error::Error>> {
    let location = "http://[::1/oauth/authorize?state=xyz";
    let app = MockApp::start(MockReply::Redirect(location.to_string())).await?;
    let (outcome, report) = run_captured(&config_for(&app.base_url)).await;

    assert_eq!(outcome, CheckOutcome::Failed);
    assert!(report.contains(&format!("Redirect Location: {location}\n")));
    assert!(report.contains(&format!("✗ ERROR: Invalid Location header: {location}")));
    assert!(!report.contains("Redirect URL Analysis"));

    app.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_connection_refused_reports_connectivity() {
    let base_url = unused_base_url();
    let port = base_url.rsplit(':').next().unwrap_or_default().to_string();
    let (outcome, report) = run_captured(&config_for(&base_url)).await;

    assert_eq!(outcome, CheckOutcome::Failed);
    assert_eq!(outcome.code(), 1);
    assert!(report.contains(&format!(
        "✗ ERROR: Cannot connect to the application. Make sure it's running on 127.0.0.1:{port}"
    )));
    assert!(!report.contains("HTTP request failed"));
    assert!(!report.contains("Response Status Code"));
    assert!(report.contains("❌ Test FAILED"));
}

#[tokio::test]
async fn test_missing_params_reported_but_pass() -> Result<(), Box<dyn std::error::Error>> {
    let app = MockApp::start(MockReply::Redirect(PARTIAL_AUTHORIZE_LOCATION.to_string())).await?;
    let (outcome, report) = run_captured(&config_for(&app.base_url)).await;

    assert_eq!(outcome, CheckOutcome::Passed);
    assert!(report.contains("  ✓ response_type: code\n"));
    assert!(report.contains("  ✓ client_id: abc\n"));
    assert!(report.contains("  ✗ scope: MISSING\n"));
    assert!(report.contains("  ✗ state: MISSING\n"));
    assert!(report.contains("  ✓ redirect_uri: http://localhost/cb\n"));
    assert!(report.contains("🎉 Test PASSED"));

    app.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_missing_params_fail_when_required() -> Result<(), Box<dyn std::error::Error>> {
    let app = MockApp::start(MockReply::Redirect(PARTIAL_AUTHORIZE_LOCATION.to_string())).await?;
    let config = RedirectCheckConfig {
        require_all_params: true,
        ..config_for(&app.base_url)
    };
    let (outcome, report) = run_captured(&config).await;

    assert_eq!(outcome, CheckOutcome::Failed);
    assert!(report.contains("  ✗ scope: MISSING\n"));
    assert!(report.contains("✗ ERROR: Missing expected parameters: scope, state"));

    app.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_relative_location_is_host_mismatch() -> Result<(), Box<dyn std::error::Error>> {
    let app = MockApp::start(MockReply::Redirect("/login?error=oauth".to_string())).await?;
    let host = app.base_url.trim_start_matches("http://").to_string();
    let (outcome, report) = run_captured(&config_for(&app.base_url)).await;

    assert_eq!(outcome, CheckOutcome::Failed);
    assert!(report.contains(&format!("Host: {host}\n")));
    assert!(report.contains("Path: /login\n"));
    assert!(report.contains(&format!(
        "✗ ERROR: Not redirecting to kauth.kakao.com (redirecting to {host})"
    )));

    app.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_repeated_parameter_reports_first_value() -> Result<(), Box<dyn std::error::Error>> {
    let location = format!("{KAKAO_AUTHORIZE_LOCATION}&state=second&scope=profile_image");
    let app = MockApp::start(MockReply::Redirect(location)).await?;
    let (outcome, report) = run_captured(&config_for(&app.base_url)).await;

    assert_eq!(outcome, CheckOutcome::Passed);
    assert!(report.contains("  ✓ state: xyz\n"));
    assert!(report.contains("  ✓ scope: profile\n"));
    assert!(!report.contains("  ✓ state: second"));
    assert!(!report.contains("  ✓ scope: profile_image"));

    app.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_slow_application_times_out() -> Result<(), Box<dyn std::error::Error>> {
    let app = MockApp::start(MockReply::Delayed {
        delay: Duration::from_secs(5),
        reply: Box::new(MockReply::Redirect(KAKAO_AUTHORIZE_LOCATION.to_string())),
    })
    .await?;
    let config = RedirectCheckConfig {
        timeout: Duration::from_millis(300),
        ..config_for(&app.base_url)
    };
    let (outcome, report) = run_captured(&config).await;

    assert_eq!(outcome, CheckOutcome::Failed);
    assert!(report.contains("✗ ERROR: Request timed out after 300ms"));

    app.shutdown();
    Ok(())
}

#[tokio::test]
async fn test_custom_provider_host() -> Result<(), Box<dyn std::error::Error>> {
    let app = MockApp::start(MockReply::Redirect(
        "https://accounts.google.com/o/oauth2/v2/auth?response_type=code&client_id=abc&state=s"
            .to_string(),
    ))
    .await?;
    let config = RedirectCheckConfig {
        expected_host: "accounts.google.com".to_string(),
        expected_params: vec!["response_type".to_string(), "nonce".to_string()],
        ..config_for(&app.base_url)
    };
    let (outcome, report) = run_captured(&config).await;

    assert_eq!(outcome, CheckOutcome::Passed);
    assert!(report.contains("  ✓ response_type: code\n"));
    assert!(report.contains("  ✗ nonce: MISSING\n"));
    assert!(!report.contains("  ✓ client_id"));
    assert!(report.contains("Correctly redirecting to accounts.google.com authorization server"));

    app.shutdown();
    Ok(())
}

/// Running the check twice against an unchanged application gives the same result
/// and sends exactly one request per run
#[tokio::test]
async fn test_repeated_runs_are_identical() -> Result<(), Box<dyn std::error::Error>> {
    for reply in [
        MockReply::Redirect(KAKAO_AUTHORIZE_LOCATION.to_string()),
        MockReply::Redirect(FOREIGN_AUTHORIZE_LOCATION.to_string()),
        MockReply::RedirectWithoutLocation,
    ] {
        let app = MockApp::start(reply).await?;
        let config = config_for(&app.base_url);

        let (first_outcome, first_report) = run_captured(&config).await;
        assert_eq!(app.hits(), 1);
        let (second_outcome, second_report) = run_captured(&config).await;
        assert_eq!(app.hits(), 2);

        assert_eq!(first_outcome, second_outcome);
        // Response headers carry a Date that may tick between runs
        assert_eq!(without_headers(&first_report), without_headers(&second_report));

        app.shutdown();
    }
    Ok(())
}

fn without_headers(report: &str) -> Vec<&str> {
    report
        .lines()
        .filter(|line| !line.starts_with("Response Headers:"))
        .collect()
}
