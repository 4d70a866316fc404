//! # Trail Document Model
//!
//! Typed view of the compliance-status part of a trail document:
//!
//! ```text
//! TrailDocument
//! └── compliance_status?            ComplianceStatus
//!     ├── attestations_statuses?    [AttestationStatus]          (trail-level)
//!     └── artifacts_statuses?       { key: ArtifactStatus }
//!         └── attestations_statuses?  [AttestationStatus]        (per artifact)
//! ```
//!
//! Trail producers add fields over time and partially populate documents
//! for trails still in flight. Every level that may be absent or
//! mis-shaped is wrapped in [`Tolerant`], which deserializes to `None`
//! instead of failing. A malformed branch therefore drops out of the typed
//! view; it never rejects the whole document. Unknown fields are ignored.
//!
//! Artifacts keep the order they appear in the document. This relies on
//! serde_json's `preserve_order` feature, enabled for the workspace.

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// JSON shape a value must have before it is deserialized as `Self`.
///
/// serde's derived struct deserializers also accept arrays (fields by
/// position). Trail records are only ever objects, so the shape is checked
/// on the raw value first.
pub trait JsonShape {
    /// Whether `value` has the JSON kind this type is read from.
    fn has_shape(value: &Value) -> bool;
}

impl<T> JsonShape for Vec<T> {
    fn has_shape(value: &Value) -> bool {
        value.is_array()
    }
}

macro_rules! record_shape {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl JsonShape for $ty {
                fn has_shape(value: &Value) -> bool {
                    value.is_object()
                }
            }
        )+
    };
}

record_shape!(
    TrailDocument,
    ComplianceStatus,
    Artifacts,
    ArtifactStatus,
    AttestationStatus,
);

/// A value that is `None` when the JSON is absent or does not have the
/// shape of `T`.
///
/// Deserialization goes through [`serde_json::Value`] first, so any
/// syntactically valid JSON is accepted and the shape check against `T`
/// happens afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tolerant<T>(pub Option<T>);

impl<T> Tolerant<T> {
    /// The well-formed value, if any.
    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    /// Whether the value was present and well-formed.
    pub fn is_present(&self) -> bool {
        self.0.is_some()
    }
}

impl<T> Default for Tolerant<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> From<Option<T>> for Tolerant<T> {
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T: DeserializeOwned + JsonShape> Tolerant<T> {
    /// Typed view of `value`, or `None` if it is mis-shaped.
    pub fn from_value(value: Value) -> Self {
        if !T::has_shape(&value) {
            return Self(None);
        }
        Self(serde_json::from_value(value).ok())
    }
}

impl<'de, T: DeserializeOwned + JsonShape> Deserialize<'de> for Tolerant<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(value))
    }
}

/// Root of a trail document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailDocument {
    /// Attestation outcomes for the trail. Absent means "no attestations".
    #[serde(default)]
    pub compliance_status: Tolerant<ComplianceStatus>,
}

impl TrailDocument {
    /// Build the typed view of an already-parsed JSON value.
    ///
    /// Total: a root that is not an object yields a document with no
    /// compliance status.
    pub fn from_value(value: Value) -> Self {
        match Tolerant::<Self>::from_value(value) {
            Tolerant(Some(document)) => document,
            Tolerant(None) => {
                tracing::trace!("trail root is not an object; treating as empty");
                Self::default()
            }
        }
    }

    /// The compliance status, if present and well-formed.
    pub fn compliance_status(&self) -> Option<&ComplianceStatus> {
        self.compliance_status.get()
    }
}

/// Attestation outcomes split into trail-level and per-artifact groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceStatus {
    /// Attestations made directly on the trail, in document order.
    #[serde(default)]
    pub attestations_statuses: Tolerant<Vec<Tolerant<AttestationStatus>>>,

    /// Per-artifact attestations keyed by artifact identifier.
    #[serde(default)]
    pub artifacts_statuses: Tolerant<Artifacts>,
}

impl ComplianceStatus {
    /// Well-formed trail-level attestations, in document order.
    pub fn trail_attestations(&self) -> impl Iterator<Item = &AttestationStatus> {
        well_formed(&self.attestations_statuses)
    }

    /// Artifacts whose value is a structured record, in document order.
    pub fn artifacts(&self) -> impl Iterator<Item = (&str, &ArtifactStatus)> {
        self.artifacts_statuses
            .get()
            .into_iter()
            .flat_map(|artifacts| artifacts.entries.iter())
            .filter_map(|(key, artifact)| match artifact.get() {
                Some(artifact) => Some((key.as_str(), artifact)),
                None => {
                    tracing::trace!(artifact = %key, "skipping artifact entry that is not a record");
                    None
                }
            })
    }
}

/// Artifact key → status mapping, in the order the keys appear in the
/// document. Keys are unique; a repeated key keeps its first position and
/// its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    entries: Vec<(String, Tolerant<ArtifactStatus>)>,
}

impl Artifacts {
    /// Number of artifact entries, well-formed or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Tolerant<ArtifactStatus>)> for Artifacts {
    fn from_iter<I: IntoIterator<Item = (String, Tolerant<ArtifactStatus>)>>(iter: I) -> Self {
        let mut entries: Vec<(String, Tolerant<ArtifactStatus>)> = Vec::new();
        for (key, artifact) in iter {
            match entries.iter_mut().find(|(existing, _)| *existing == key) {
                Some(entry) => entry.1 = artifact,
                None => entries.push((key, artifact)),
            }
        }
        Self { entries }
    }
}

impl<'de> Deserialize<'de> for Artifacts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(map
            .into_iter()
            .map(|(key, value)| (key, Tolerant::from_value(value)))
            .collect())
    }
}

impl Serialize for Artifacts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, artifact) in &self.entries {
            map.serialize_entry(key, artifact)?;
        }
        map.end()
    }
}

/// Attestations attached to a single artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactStatus {
    /// Attestations on this artifact, in document order. May be empty.
    #[serde(default)]
    pub attestations_statuses: Tolerant<Vec<Tolerant<AttestationStatus>>>,
}

impl ArtifactStatus {
    /// Well-formed attestations on this artifact, in document order.
    pub fn attestations(&self) -> impl Iterator<Item = &AttestationStatus> {
        well_formed(&self.attestations_statuses)
    }
}

/// One attestation and its current status token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationStatus {
    /// Display identifier of the attestation, e.g. `"test-reports"`.
    pub attestation_name: String,
    /// Opaque status token, e.g. `"MISSING"` or `"COMPLETE"`.
    pub status: String,
}

impl AttestationStatus {
    /// Construct an attestation status record.
    pub fn new(attestation_name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            attestation_name: attestation_name.into(),
            status: status.into(),
        }
    }
}

/// Entries that are records with a non-empty name and a string status.
fn well_formed(
    entries: &Tolerant<Vec<Tolerant<AttestationStatus>>>,
) -> impl Iterator<Item = &AttestationStatus> {
    entries
        .get()
        .into_iter()
        .flatten()
        .filter_map(|entry| entry.get())
        .filter(|attestation| !attestation.attestation_name.is_empty())
}
