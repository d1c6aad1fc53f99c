//! Human-readable report of a redirect check
//!
//! The report is the tool's only user-facing output. Diagnostics go through
//! `tracing` instead, so the two never interleave on the same stream.

use std::io::{self, Write};
use url::Url;

use crate::check::CheckOutcome;
use crate::errors::RedirectCheckError;
use crate::redirect::{ObservedResponse, ParamStatus, RedirectAnalysis};

const TITLE: &str = "OAuth2 Authorization Redirect Test";
const RULE_WIDTH: usize = 50;

/// Writes each stage of a check as it happens
pub struct Reporter<W: Write> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    pub fn title(&mut self) -> io::Result<()> {
        writeln!(self.out, "{TITLE}")?;
        writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))
    }

    pub fn request(&mut self, url: &Url) -> io::Result<()> {
        writeln!(self.out, "Testing OAuth2 endpoint: {url}")?;
        writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))
    }

    /// Status line and headers, printed for every answer
    pub fn response(&mut self, observed: &ObservedResponse) -> io::Result<()> {
        writeln!(
            self.out,
            "Response Status Code: {}",
            observed.status.as_u16()
        )?;

        let headers: Vec<String> = observed
            .headers
            .iter()
            .map(|(name, value)| {
                format!(
                    "{:?}: {:?}",
                    name.as_str(),
                    String::from_utf8_lossy(value.as_bytes())
                )
            })
            .collect();
        writeln!(self.out, "Response Headers: {{{}}}", headers.join(", "))
    }

    /// Raw `Location`, printed before it is parsed
    pub fn location(&mut self, location: &str) -> io::Result<()> {
        writeln!(self.out, "Redirect Location: {location}")
    }

    /// Decomposed redirect target with one line per expected parameter
    pub fn analysis(&mut self, analysis: &RedirectAnalysis) -> io::Result<()> {
        let target = &analysis.target;
        writeln!(self.out)?;
        writeln!(self.out, "Redirect URL Analysis:")?;
        writeln!(self.out, "Scheme: {}", target.scheme)?;
        writeln!(self.out, "Host: {}", target.host)?;
        writeln!(self.out, "Path: {}", target.path)?;
        writeln!(self.out, "Query Parameters:")?;

        for param in &analysis.params {
            match &param.status {
                ParamStatus::Present(value) => writeln!(self.out, "  ✓ {}: {value}", param.name)?,
                ParamStatus::Missing => writeln!(self.out, "  ✗ {}: MISSING", param.name)?,
            }
        }
        Ok(())
    }

    pub fn success(&mut self, expected_host: &str) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "✓ SUCCESS: Correctly redirecting to {expected_host} authorization server"
        )
    }

    /// Error line, followed by the response body for unexpected statuses
    pub fn failure(&mut self, err: &RedirectCheckError) -> io::Result<()> {
        if followed_response(err) {
            writeln!(self.out)?;
        }
        writeln!(self.out, "✗ ERROR: {err}")?;

        match err {
            RedirectCheckError::UnexpectedStatus { body, .. } if !body.is_empty() => {
                writeln!(self.out, "Response body: {body}")
            }
            _ => Ok(()),
        }
    }

    pub fn summary(&mut self, outcome: CheckOutcome) -> io::Result<()> {
        writeln!(self.out)?;
        match outcome {
            CheckOutcome::Passed => writeln!(
                self.out,
                "🎉 Test PASSED: OAuth2 authorization endpoint is working correctly!"
            )?,
            CheckOutcome::Failed => writeln!(
                self.out,
                "❌ Test FAILED: There are issues with the OAuth2 authorization endpoint"
            )?,
        }
        self.out.flush()
    }
}

/// Errors raised after the response was printed get a blank line before them
fn followed_response(err: &RedirectCheckError) -> bool {
    matches!(
        err,
        RedirectCheckError::UnexpectedStatus { .. }
            | RedirectCheckError::MissingLocation
            | RedirectCheckError::InvalidLocation(_)
            | RedirectCheckError::HostMismatch { .. }
            | RedirectCheckError::MissingParameters(_)
    )
}
