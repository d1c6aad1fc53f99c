use std::io::Write;
use std::process::ExitCode;

use crate::config::RedirectCheckConfig;
use crate::errors::RedirectCheckError;
use crate::redirect::{
    RedirectAnalysis, analyze_redirect, build_client, fetch_authorization_redirect,
    location_header, parse_redirect_target, require_found, verdict,
};
use crate::report::Reporter;

/// Final result of one check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    Failed,
}

impl CheckOutcome {
    /// 0 when the redirect targets the expected host, 1 for every failure
    pub fn code(self) -> u8 {
        match self {
            CheckOutcome::Passed => 0,
            CheckOutcome::Failed => 1,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

/// Run a complete check and write its report to `out`
///
/// All failures are reported and turned into [`CheckOutcome::Failed`]; the
/// returned error is reserved for a report that could not be written.
pub async fn run_check<W: Write>(
    config: &RedirectCheckConfig,
    out: W,
) -> Result<CheckOutcome, RedirectCheckError> {
    let mut reporter = Reporter::new(out);
    reporter.title()?;

    let outcome = match inspect_endpoint(config, &mut reporter).await {
        Ok(_) => {
            tracing::info!("Authorization redirect targets {}", config.expected_host);
            reporter.success(&config.expected_host)?;
            CheckOutcome::Passed
        }
        Err(RedirectCheckError::Output(e)) => return Err(RedirectCheckError::Output(e)),
        Err(e) => {
            tracing::info!("Authorization redirect check failed: {}", e);
            reporter.failure(&e)?;
            CheckOutcome::Failed
        }
    };

    reporter.summary(outcome)?;
    Ok(outcome)
}

/// The linear sequence of the check, reporting each stage as it completes
async fn inspect_endpoint<W: Write>(
    config: &RedirectCheckConfig,
    reporter: &mut Reporter<W>,
) -> Result<RedirectAnalysis, RedirectCheckError> {
    let url = config.target_url()?;
    reporter.request(&url)?;
    config.validate()?;

    let client = build_client(config.timeout)?;
    let observed = fetch_authorization_redirect(&client, &url, config.timeout).await?;
    reporter.response(&observed)?;

    require_found(&observed)?;
    let location = location_header(&observed)?;
    reporter.location(&location)?;
    let target = parse_redirect_target(&location, &observed.url)?;

    let analysis = analyze_redirect(target, config);
    reporter.analysis(&analysis)?;
    verdict(&analysis, config)?;

    Ok(analysis)
}
