//! # Check Subcommand
//!
//! The compliance gate: load the trail, collect attestations holding the
//! target status, decide, report.
//!
//! Exit codes: 0 when no attestation holds the status, 1 when at least one
//! does, 1 when the trail cannot be loaded or inputs are missing.
//!
//! Inputs are resolved flag → environment → config file. The environment
//! names are the ones GitHub Actions sets for action inputs, so the binary
//! can run directly as an action entrypoint:
//!
//! ```bash
//! INPUT_JSON_FILE_PATH=trail.json INPUT_STATUS_TO_FIND=MISSING trailgate check --format github
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::Args;

use trailgate_core::{collect_matches, decide, load_trail, TargetStatus};

use crate::config::GateConfig;
use crate::report::{OutputFormat, Reporter};

/// Arguments for the `trailgate check` subcommand.
#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    /// Path to the trail JSON document.
    #[arg(
        short = 'f',
        long = "json-file-path",
        env = "INPUT_JSON_FILE_PATH",
        value_name = "PATH"
    )]
    pub json_file_path: Option<PathBuf>,

    /// Attestation status that fails the gate, e.g. MISSING. Compared exactly.
    #[arg(
        short = 's',
        long = "status-to-find",
        env = "INPUT_STATUS_TO_FIND",
        value_name = "STATUS"
    )]
    pub status_to_find: Option<String>,

    /// Report format.
    #[arg(long, value_enum, env = "TRAILGATE_FORMAT")]
    pub format: Option<OutputFormat>,
}

/// Inputs after merging flags, environment, and config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInputs {
    /// Trail document to scan.
    pub trail_file: PathBuf,
    /// Status token that fails the gate.
    pub status: TargetStatus,
}

impl CheckArgs {
    /// Report format, falling back to the config file and then `text`.
    pub fn resolve_format(&self, config: &GateConfig) -> OutputFormat {
        self.format.or(config.format).unwrap_or_default()
    }

    /// Merge flags with config defaults and validate them.
    ///
    /// Empty values count as not supplied; GitHub Actions sets unset
    /// inputs to the empty string.
    pub fn resolve_inputs(&self, config: &GateConfig) -> Result<CheckInputs> {
        let trail_file = self
            .json_file_path
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .or_else(|| config.trail_file.clone())
            .ok_or_else(|| anyhow!("Input required and not supplied: json_file_path"))?;

        let status = self
            .status_to_find
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| config.status_to_find.clone())
            .ok_or_else(|| anyhow!("Input required and not supplied: status_to_find"))?;

        Ok(CheckInputs {
            trail_file,
            status: TargetStatus::new(status)?,
        })
    }
}

/// Execute the check subcommand against the process's stdout and stderr.
///
/// The config file at `config_path`, if any, is loaded here so that a bad
/// config is reported like any other check failure.
pub fn run_check(args: &CheckArgs, config_path: Option<&Path>) -> Result<u8> {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let code = match GateConfig::load(config_path) {
        Ok(config) => {
            let mut reporter =
                Reporter::new(args.resolve_format(&config), stdout.lock(), stderr.lock());
            let code = execute_check(args, &config, &mut reporter)?;
            reporter.flush()?;
            code
        }
        Err(e) => {
            let format = args.format.unwrap_or_default();
            let mut reporter = Reporter::new(format, stdout.lock(), stderr.lock());
            config_failure(&e, &mut reporter)?
        }
    };
    Ok(code)
}

/// Report a config load failure through `reporter` and return exit code 1.
///
/// The format comes from the flag or environment alone, since the config
/// that would otherwise supply it could not be read.
pub fn config_failure<W: Write, E: Write>(
    error: &anyhow::Error,
    reporter: &mut Reporter<W, E>,
) -> Result<u8> {
    tracing::debug!(error = ?error, "config load failed");
    reporter.error(&format!("{error:#}"))?;
    reporter.flush()?;
    Ok(1)
}

/// Execute the check subcommand, writing through `reporter`.
///
/// Input and load failures are reported and mapped to exit code 1. Only a
/// failure to write the report itself is returned as `Err`.
pub fn execute_check<W: Write, E: Write>(
    args: &CheckArgs,
    config: &GateConfig,
    reporter: &mut Reporter<W, E>,
) -> Result<u8> {
    let inputs = match args.resolve_inputs(config) {
        Ok(inputs) => inputs,
        Err(e) => {
            reporter.error(&format!("{e:#}"))?;
            return Ok(1);
        }
    };

    reporter.searching(&inputs.status)?;

    let document = match load_trail(&inputs.trail_file) {
        Ok(document) => document,
        Err(e) => {
            tracing::debug!(path = %inputs.trail_file.display(), error = ?e, "trail load failed");
            reporter.error(&format!("{:#}", anyhow::Error::new(e)))?;
            return Ok(1);
        }
    };

    let verdict = decide(collect_matches(&document, &inputs.status));

    tracing::info!(
        path = %inputs.trail_file.display(),
        status = %inputs.status,
        matched = verdict.matches().len(),
        compliant = verdict.is_compliant(),
        "trail scanned"
    );

    reporter.verdict(&inputs.status, &verdict)?;
    Ok(verdict.exit_code())
}
