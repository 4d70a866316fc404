//! # trailgate-cli — Release Trail Compliance Gate
//!
//! Provides the `trailgate` command-line interface around
//! [`trailgate_core`].
//!
//! ## Subcommands
//!
//! - `trailgate check` — Fail when any attestation holds a given status.
//! - `trailgate inspect` — Count a trail's attestations by status.
//!
//! ## CI Usage
//!
//! ```bash
//! trailgate check --json-file-path trail.json --status-to-find MISSING
//! trailgate --config .trailgate.yaml check --format github
//! trailgate inspect trail.json --json
//! ```

pub mod check;
pub mod config;
pub mod inspect;
pub mod report;

pub use config::GateConfig;
pub use report::{OutputFormat, Reporter};
