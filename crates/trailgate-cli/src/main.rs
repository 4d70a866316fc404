//! # trailgate CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trailgate_cli::check::{run_check, CheckArgs};
use trailgate_cli::inspect::{run_inspect, InspectArgs};

/// Release trail compliance gate.
///
/// Scans a trail document for attestations in a given status and fails the
/// pipeline when any are found.
#[derive(Parser, Debug)]
#[command(name = "trailgate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging on stderr. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file with check defaults. Read by `check` only.
    #[arg(long, global = true, env = "TRAILGATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fail when any attestation in the trail holds the given status.
    Check(CheckArgs),

    /// Count the trail's attestations by status.
    Inspect(InspectArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("trailgate CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Commands::Check(args) => run_check(&args, cli.config.as_deref()),
        Commands::Inspect(args) => run_inspect(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}
