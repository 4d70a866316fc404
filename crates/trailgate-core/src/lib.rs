//! # trailgate-core — Attestation-Status Scanner
//!
//! Decides whether a release trail still carries attestations in a given
//! status. The trail document is produced upstream (fingerprint, search,
//! fetch) and handed to this crate as a JSON file.
//!
//! ## Pipeline
//!
//! ```text
//! load_trail(path)  -->  collect(doc, target)  -->  decide(matches)
//!   TrailDocument          Vec<String>               Verdict
//! ```
//!
//! ## Crate Policy
//!
//! - No I/O outside [`loader`]. Collection and decision are pure.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Malformed attestation entries are skipped, never reported as errors.
//!   Only file-level failures (missing file, invalid JSON) are fatal.

pub mod error;
pub mod loader;
pub mod scan;
pub mod status;
pub mod trail;
pub mod verdict;

// Re-export primary types for ergonomic imports.
pub use error::{TrailError, ValidationError};
pub use loader::{load_trail, parse_trail};
pub use scan::{collect, collect_matches, tally, AttestationMatch, StatusTally};
pub use status::TargetStatus;
pub use trail::{
    Artifacts, ArtifactStatus, AttestationStatus, ComplianceStatus, Tolerant, TrailDocument,
};
pub use verdict::{decide, Verdict};
