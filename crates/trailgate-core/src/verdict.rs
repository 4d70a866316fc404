//! # Verdict Reducer
//!
//! Maps the collected matches to a pass/fail outcome. Kept separate from
//! reporting so the decision can be tested without touching exit codes or
//! log output.
//!
//! The verdict is generic over the match type: plain names from
//! [`crate::collect`], or scoped [`crate::AttestationMatch`] values from
//! [`crate::collect_matches`]. Either way the verdict owns the match list, so
//! anything rendered from it agrees with the decision.

use serde::{Deserialize, Serialize};

/// Outcome of a compliance scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "matches", rename_all = "snake_case")]
pub enum Verdict<M = String> {
    /// No attestation holds the target status.
    Compliant,
    /// At least one attestation holds the target status. Carries the full
    /// match sequence in collection order.
    NonCompliant(Vec<M>),
}

/// Decide the verdict for a match sequence.
pub fn decide<M>(matches: Vec<M>) -> Verdict<M> {
    if matches.is_empty() {
        Verdict::Compliant
    } else {
        Verdict::NonCompliant(matches)
    }
}

impl<M> Verdict<M> {
    /// Whether the trail passes the gate.
    pub fn is_compliant(&self) -> bool {
        matches!(self, Verdict::Compliant)
    }

    /// Matches in collection order; empty when compliant.
    pub fn matches(&self) -> &[M] {
        match self {
            Verdict::Compliant => &[],
            Verdict::NonCompliant(matches) => matches,
        }
    }

    /// Process exit code: 0 when compliant, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Verdict::Compliant => 0,
            Verdict::NonCompliant(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matches_are_compliant() {
        let verdict = decide(Vec::<String>::new());
        assert_eq!(verdict, Verdict::Compliant);
        assert!(verdict.is_compliant());
        assert!(verdict.matches().is_empty());
        assert_eq!(verdict.exit_code(), 0);
    }

    #[test]
    fn any_match_is_non_compliant() {
        let verdict = decide(vec!["A".to_string()]);
        assert_eq!(verdict, Verdict::NonCompliant(vec!["A".to_string()]));
        assert!(!verdict.is_compliant());
        assert_eq!(verdict.exit_code(), 1);
    }

    #[test]
    fn non_compliant_keeps_full_sequence_in_order() {
        let matches: Vec<String> = ["A", "Z", "A"].iter().map(|s| s.to_string()).collect();
        let verdict = decide(matches.clone());
        assert_eq!(verdict.matches(), matches.as_slice());
    }

    #[test]
    fn verdict_serializes_with_tag() {
        let json = serde_json::to_value(decide(vec!["A".to_string()])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"verdict": "non_compliant", "matches": ["A"]})
        );
        let json = serde_json::to_value(decide(Vec::<String>::new())).unwrap();
        assert_eq!(json, serde_json::json!({"verdict": "compliant"}));
    }

    #[test]
    fn scoped_matches_stay_with_the_verdict() {
        use crate::scan::AttestationMatch;

        let found = vec![
            AttestationMatch {
                attestation_name: "A".to_string(),
                artifact: None,
            },
            AttestationMatch {
                attestation_name: "Z".to_string(),
                artifact: Some("art-1".to_string()),
            },
        ];
        let verdict = decide(found.clone());
        assert!(!verdict.is_compliant());
        assert_eq!(verdict.matches(), found.as_slice());

        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["matches"][1]["artifact"], "art-1");
    }
}
