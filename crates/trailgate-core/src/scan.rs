//! # Attestation Collector
//!
//! Walks a [`TrailDocument`] and collects every attestation whose status
//! equals a target token.
//!
//! ## Ordering
//!
//! The output order is part of the contract:
//!
//! 1. Trail-level attestations, in document order.
//! 2. Per-artifact attestations, artifacts in the order their keys appear
//!    in the document, each artifact's attestations in document order.
//!
//! ## Tolerance
//!
//! Absent substructures contribute nothing. Entries that are not records,
//! lack a name or status, or carry a non-string value are skipped. The
//! collector never fails.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::status::TargetStatus;
use crate::trail::{AttestationStatus, TrailDocument};

/// An attestation that holds the target status, with where it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationMatch {
    /// Display identifier of the attestation.
    pub attestation_name: String,
    /// Artifact key the attestation belongs to; `None` for trail-level.
    pub artifact: Option<String>,
}

/// Collect the names of all attestations whose status equals `target`.
///
/// Pure and deterministic: no I/O, no mutation, same output for the same
/// input pair. Returns an empty vector when nothing matches or the document
/// has no compliance status.
pub fn collect(document: &TrailDocument, target: &TargetStatus) -> Vec<String> {
    collect_matches(document, target)
        .into_iter()
        .map(|m| m.attestation_name)
        .collect()
}

/// Like [`collect`], but keeps the scope of each match.
pub fn collect_matches(document: &TrailDocument, target: &TargetStatus) -> Vec<AttestationMatch> {
    let Some(compliance) = document.compliance_status() else {
        tracing::debug!("trail has no compliance status");
        return Vec::new();
    };

    let mut matches: Vec<AttestationMatch> = compliance
        .trail_attestations()
        .filter(|a| target.matches(&a.status))
        .map(|a| AttestationMatch {
            attestation_name: a.attestation_name.clone(),
            artifact: None,
        })
        .collect();

    for (key, artifact) in compliance.artifacts() {
        matches.extend(
            artifact
                .attestations()
                .filter(|a| target.matches(&a.status))
                .map(|a| AttestationMatch {
                    attestation_name: a.attestation_name.clone(),
                    artifact: Some(key.to_string()),
                }),
        );
    }

    tracing::debug!(
        target_status = %target,
        matched = matches.len(),
        "collected attestations by status"
    );

    matches
}

/// Count of well-formed attestations per status token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTally {
    /// Number of well-formed attestations seen.
    pub total: usize,
    /// Status token → number of attestations holding it.
    pub by_status: BTreeMap<String, usize>,
}

impl StatusTally {
    /// Number of attestations holding `status`.
    pub fn count(&self, status: &str) -> usize {
        self.by_status.get(status).copied().unwrap_or(0)
    }

    fn record(&mut self, attestation: &AttestationStatus) {
        self.total += 1;
        *self.by_status.entry(attestation.status.clone()).or_insert(0) += 1;
    }
}

/// Count every well-formed attestation in the document by status.
///
/// Covers the same entries, with the same skip rules, as [`collect`].
pub fn tally(document: &TrailDocument) -> StatusTally {
    let mut tally = StatusTally::default();
    if let Some(compliance) = document.compliance_status() {
        compliance.trail_attestations().for_each(|a| tally.record(a));
        for (_, artifact) in compliance.artifacts() {
            artifact.attestations().for_each(|a| tally.record(a));
        }
    }
    tally
}
