//! # Target Status
//!
//! Newtype for the status token a scan looks for. Statuses are opaque:
//! `"MISSING"` and `"COMPLETE"` are what trail producers emit today, but no
//! enumeration is enforced and no normalization is applied. `"missing"` and
//! `"MISSING "` are different tokens.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A validated, non-empty status token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetStatus(String);

impl TargetStatus {
    /// Create a target status, rejecting the empty string.
    ///
    /// The token is kept byte-for-byte. Surrounding whitespace is part of
    /// the token.
    pub fn new(status: impl Into<String>) -> Result<Self, ValidationError> {
        let status = status.into();
        if status.is_empty() {
            return Err(ValidationError::EmptyTargetStatus);
        }
        Ok(Self(status))
    }

    /// Access the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact, case-sensitive comparison against a document status.
    pub fn matches(&self, status: &str) -> bool {
        self.0 == status
    }
}

impl TryFrom<String> for TargetStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TargetStatus> for String {
    fn from(status: TargetStatus) -> Self {
        status.0
    }
}

impl AsRef<str> for TargetStatus {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
