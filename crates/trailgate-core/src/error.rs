//! # Error Hierarchy
//!
//! Structured error types for trail loading, built with `thiserror`.
//!
//! Only two things can go wrong before a scan: the trail file is missing, or
//! its content is not JSON. Both abort the run. Shape problems inside a
//! well-formed JSON document are not errors at all; the scanner skips them.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a [`TrailDocument`](crate::TrailDocument) from disk.
#[derive(Error, Debug)]
pub enum TrailError {
    /// The trail path does not reference an existing file.
    #[error("JSON file '{}' not found.", path.display())]
    NotFound {
        /// The path exactly as supplied by the caller.
        path: PathBuf,
    },

    /// The file content is not syntactically valid JSON.
    #[error("Error reading or parsing JSON file {}", path.display())]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying parser diagnostic.
        source: serde_json::Error,
    },

    /// Any other read failure (permissions, directory).
    #[error("failed to read trail file {}", path.display())]
    Io {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Rejected caller input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The target status token is the empty string.
    #[error("invalid target status: must be non-empty")]
    EmptyTargetStatus,
}
