//! # Result Reporter
//!
//! Renders scan outcomes for the host CI platform. The reporter owns the
//! wording of every user-facing line; it never decides pass or fail.
//!
//! | Format   | Progress / matches | Failure summary and errors          |
//! |----------|--------------------|-------------------------------------|
//! | `text`   | stdout             | stderr                              |
//! | `github` | stdout             | stdout, as `::error::` commands     |
//! | `json`   | one object, stdout | errors on stderr                    |

use std::io::{self, Write};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use trailgate_core::{AttestationMatch, TargetStatus, Verdict};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain log lines.
    #[default]
    Text,
    /// GitHub Actions workflow commands for failures.
    Github,
    /// A single JSON object.
    Json,
}

/// Machine-readable scan result emitted in `json` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    /// The status token searched for.
    pub status: String,
    /// Whether the gate passed.
    pub compliant: bool,
    /// Number of matching attestations.
    pub count: usize,
    /// Matches in collection order.
    pub matches: Vec<AttestationMatch>,
}

/// Writes reports to a pair of output streams.
pub struct Reporter<W, E> {
    format: OutputFormat,
    out: W,
    err: E,
}

impl<W: Write, E: Write> Reporter<W, E> {
    /// Create a reporter writing regular output to `out` and diagnostics to `err`.
    pub fn new(format: OutputFormat, out: W, err: E) -> Self {
        Self { format, out, err }
    }

    /// Announce the status being searched for.
    pub fn searching(&mut self, status: &TargetStatus) -> io::Result<()> {
        match self.format {
            OutputFormat::Text | OutputFormat::Github => {
                writeln!(self.out, "Searching for attestations with status: {status}")
            }
            OutputFormat::Json => Ok(()),
        }
    }

    /// Report the verdict and, when non-compliant, every match.
    pub fn verdict(
        &mut self,
        status: &TargetStatus,
        verdict: &Verdict<AttestationMatch>,
    ) -> io::Result<()> {
        let matches = verdict.matches();

        if self.format == OutputFormat::Json {
            let report = ScanReport {
                status: status.to_string(),
                compliant: verdict.is_compliant(),
                count: matches.len(),
                matches: matches.to_vec(),
            };
            serde_json::to_writer_pretty(&mut self.out, &report)?;
            return writeln!(self.out);
        }

        if verdict.is_compliant() {
            return writeln!(self.out, "No attestations found with '{status}' status.");
        }

        self.failure(&format!(
            "Found {} attestations with status '{status}'.",
            matches.len()
        ))?;
        writeln!(
            self.out,
            "The following attestations have a '{status}' status:"
        )?;
        for m in matches {
            writeln!(self.out, "- {}", m.attestation_name)?;
        }
        Ok(())
    }

    /// Report a fatal error.
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.failure(&format!("Error: {message}"))
    }

    fn failure(&mut self, message: &str) -> io::Result<()> {
        match self.format {
            OutputFormat::Github => {
                writeln!(self.out, "::error::{}", escape_workflow_data(message))
            }
            OutputFormat::Text | OutputFormat::Json => writeln!(self.err, "{message}"),
        }
    }

    /// Flush both streams.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }
}

/// Escape a workflow command message so it stays on one line.
pub fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> TargetStatus {
        TargetStatus::new("MISSING").unwrap()
    }

    fn trail_match(name: &str, artifact: Option<&str>) -> AttestationMatch {
        AttestationMatch {
            attestation_name: name.to_string(),
            artifact: artifact.map(str::to_string),
        }
    }

    fn render(format: OutputFormat, f: impl FnOnce(&mut Reporter<&mut Vec<u8>, &mut Vec<u8>>)) -> (String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let mut reporter = Reporter::new(format, &mut out, &mut err);
            f(&mut reporter);
        }
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn text_compliant() {
        let (out, err) = render(OutputFormat::Text, |r| {
            r.searching(&status()).unwrap();
            r.verdict(&status(), &Verdict::Compliant).unwrap();
        });
        assert_eq!(
            out,
            "Searching for attestations with status: MISSING\n\
             No attestations found with 'MISSING' status.\n"
        );
        assert!(err.is_empty());
    }

    #[test]
    fn text_non_compliant_lists_every_match() {
        let verdict = Verdict::NonCompliant(vec![
            trail_match("A", None),
            trail_match("Z", Some("art-1")),
        ]);
        let (out, err) = render(OutputFormat::Text, |r| {
            r.verdict(&status(), &verdict).unwrap();
        });
        assert_eq!(
            out,
            "The following attestations have a 'MISSING' status:\n- A\n- Z\n"
        );
        assert_eq!(err, "Found 2 attestations with status 'MISSING'.\n");
    }

    #[test]
    fn github_failure_is_workflow_command() {
        let verdict = Verdict::NonCompliant(vec![trail_match("test-reports", Some("backend"))]);
        let (out, err) = render(OutputFormat::Github, |r| {
            r.verdict(&status(), &verdict).unwrap();
        });
        assert!(out.starts_with("::error::Found 1 attestations with status 'MISSING'.\n"));
        assert!(out.ends_with("- test-reports\n"));
        assert!(err.is_empty());
    }

    #[test]
    fn text_and_json_counts_agree() {
        let verdict = Verdict::NonCompliant(vec![
            trail_match("A", None),
            trail_match("A", Some("art-1")),
            trail_match("B", Some("art-2")),
        ]);
        let (_, err) = render(OutputFormat::Text, |r| {
            r.verdict(&status(), &verdict).unwrap();
        });
        let (out, _) = render(OutputFormat::Json, |r| {
            r.verdict(&status(), &verdict).unwrap();
        });
        let report: ScanReport = serde_json::from_str(&out).unwrap();
        assert_eq!(report.count, 3);
        assert_eq!(report.matches.len(), 3);
        assert_eq!(err, "Found 3 attestations with status 'MISSING'.\n");
    }

    #[test]
    fn github_error_is_escaped() {
        let (out, _) = render(OutputFormat::Github, |r| {
            r.error("line one\nline two 100%").unwrap();
        });
        assert_eq!(out, "::error::Error: line one%0Aline two 100%25\n");
    }

    #[test]
    fn text_error_goes_to_stderr() {
        let (out, err) = render(OutputFormat::Text, |r| {
            r.error("JSON file 'x.json' not found.").unwrap();
        });
        assert!(out.is_empty());
        assert_eq!(err, "Error: JSON file 'x.json' not found.\n");
    }

    #[test]
    fn json_report_is_single_object() {
        let matches = vec![trail_match("A", None), trail_match("X", Some("art-1"))];
        let verdict = Verdict::NonCompliant(matches.clone());
        let (out, err) = render(OutputFormat::Json, |r| {
            r.searching(&status()).unwrap();
            r.verdict(&status(), &verdict).unwrap();
        });
        assert!(err.is_empty());
        let report: ScanReport = serde_json::from_str(&out).unwrap();
        assert_eq!(report.status, "MISSING");
        assert!(!report.compliant);
        assert_eq!(report.count, 2);
        assert_eq!(report.matches, matches);

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["matches"][0]["artifact"], serde_json::Value::Null);
        assert_eq!(value["matches"][1]["artifact"], "art-1");
    }

    #[test]
    fn json_compliant_report() {
        let (out, _) = render(OutputFormat::Json, |r| {
            r.verdict(&status(), &Verdict::Compliant).unwrap();
        });
        let report: ScanReport = serde_json::from_str(&out).unwrap();
        assert!(report.compliant);
        assert_eq!(report.count, 0);
        assert!(report.matches.is_empty());
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape_workflow_data("plain"), "plain");
        assert_eq!(escape_workflow_data("a\r\nb"), "a%0D%0Ab");
    }
}
