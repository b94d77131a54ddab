//! Strong type definitions for orgledger.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An organizational identity: the unit of ownership.
///
/// Every record is owned by exactly one org, stamped at creation and
/// immutable for the lifetime of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrgId(String);

impl OrgId {
    /// Create a new OrgId.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OrgId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for OrgId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A fully qualified store key: `<namespace>/<id>`.
///
/// The namespace comes from the entity kind, so two kinds with the same
/// caller-assigned id never collide in the store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordKey(String);

impl RecordKey {
    /// Compose a key from a namespace and a caller-assigned id.
    pub fn compose(namespace: &str, id: &str) -> Self {
        Self(format!("{}/{}", namespace, id))
    }

    /// Get the full key string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque identifier of the commit that produced a revision.
///
/// Derived by the store as a truncated Blake3 hash over the key, the
/// per-key revision sequence, and the commit timestamp. Unique per
/// revision; callers must not parse it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(String);

impl TxId {
    /// Derive a TxId for a revision of `key` at per-key sequence `seq`
    /// committed at `timestamp` (Unix ms).
    pub fn derive(key: &str, seq: u64, timestamp: i64) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(key.as_bytes());
        hasher.update(&seq.to_be_bytes());
        hasher.update(&timestamp.to_be_bytes());
        let hash = hasher.finalize();
        Self(hex::encode(&hash.as_bytes()[..16]))
    }

    /// Get the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TxId {
    /// Rehydrate a TxId persisted in its string form.
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
