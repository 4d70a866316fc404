//! The `trailgate inspect` subcommand.
//!
//! Summarizes a trail document by attestation status, for debugging a gate
//! that fails (or passes) unexpectedly.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use trailgate_core::{load_trail, tally, StatusTally};

/// Arguments for `trailgate inspect`.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the trail JSON document.
    #[arg(value_name = "PATH")]
    pub trail: PathBuf,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the inspect command.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let document = load_trail(&args.trail)?;
    let summary = tally(&document);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &summary)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", format_summary(&summary))?;
    }
    out.flush()?;

    Ok(0)
}

/// Render a tally as one line per status, sorted by status token.
pub fn format_summary(summary: &StatusTally) -> String {
    let mut output = format!("Attestations: {}\n", summary.total);
    let width = summary.by_status.keys().map(String::len).max().unwrap_or(0);
    for (status, count) in &summary.by_status {
        output.push_str(&format!("  {status:<width$}  {count}\n"));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn summary_lists_statuses_in_order() {
        let summary = StatusTally {
            total: 5,
            by_status: BTreeMap::from([
                ("MISSING".to_string(), 2),
                ("COMPLETE".to_string(), 3),
            ]),
        };
        assert_eq!(
            format_summary(&summary),
            "Attestations: 5\n  COMPLETE  3\n  MISSING   2\n"
        );
    }

    #[test]
    fn empty_summary() {
        assert_eq!(
            format_summary(&StatusTally::default()),
            "Attestations: 0\n"
        );
    }
}
