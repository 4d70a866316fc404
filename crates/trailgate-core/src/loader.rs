//! # Trail Loader
//!
//! Reads a trail document from disk. This is the only I/O in the crate:
//! exactly one read of the file, no writes, no path normalization.
//!
//! A missing file and invalid JSON are fatal and abort the run before any
//! scan. Everything past the JSON syntax check is handled by the tolerant
//! model in [`crate::trail`], so a syntactically valid file always loads.

use std::path::Path;

use serde_json::Value;

use crate::error::TrailError;
use crate::trail::TrailDocument;

/// Load and parse the trail document at `path`.
///
/// # Errors
///
/// - [`TrailError::NotFound`] if `path` does not reference an existing file.
/// - [`TrailError::Parse`] if the content is not valid JSON, including
///   content that is not valid UTF-8.
/// - [`TrailError::Io`] for any other read failure.
pub fn load_trail(path: impl AsRef<Path>) -> Result<TrailDocument, TrailError> {
    let path = path.as_ref();
    let content = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TrailError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            TrailError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "read trail document");

    parse_trail(&content).map_err(|e| TrailError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse trail document bytes already held in memory.
///
/// Only JSON syntax errors are reported, and invalid UTF-8 is one of them.
/// Any valid JSON value produces a document; shapes the model does not
/// recognize are left out of it.
pub fn parse_trail(content: impl AsRef<[u8]>) -> Result<TrailDocument, serde_json::Error> {
    let value: Value = serde_json::from_slice(content.as_ref())?;
    Ok(TrailDocument::from_value(value))
}
