//! The stored record envelope and the entity-kind abstraction.
//!
//! A [`Record`] wraps arbitrary domain fields with the ownership metadata
//! the access layer cares about. The domain fields are opaque to the guard
//! and the auditor; they only ever read or preserve `owner_org` and
//! `updated_by`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::types::{OrgId, RecordKey};

/// The unit of stored state.
///
/// `owner_org` is stamped at creation and never changes for the lifetime
/// of the key, including across updates. `updated_by` is overwritten on
/// every successful mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<F> {
    /// Caller-assigned unique id, immutable after creation.
    pub id: String,
    /// The org that created the record. Never rewritten.
    pub owner_org: OrgId,
    /// The org that performed the most recent mutation.
    pub updated_by: OrgId,
    /// Domain payload, opaque to the access layer.
    pub fields: F,
}

impl<F> Record<F> {
    /// Create a fresh record owned by `org`.
    ///
    /// Both `owner_org` and `updated_by` are stamped with the creator.
    pub fn new(id: impl Into<String>, org: OrgId, fields: F) -> Self {
        Self {
            id: id.into(),
            owner_org: org.clone(),
            updated_by: org,
            fields,
        }
    }

    /// Build the successor of this record after a mutation by `updated_by`.
    ///
    /// Keeps `id` and `owner_org` from `self`; replaces the domain fields.
    pub fn rewrite(self, fields: F, updated_by: OrgId) -> Self {
        Self {
            id: self.id,
            owner_org: self.owner_org,
            updated_by,
            fields,
        }
    }
}

/// Parameterizes the generic entity pipeline by domain-field shape.
///
/// One service, one guard, one auditor serve every entity kind; the kind
/// only contributes its field type and its keyspace namespace.
pub trait EntityKind {
    /// The domain-field shape stored inside the record envelope.
    type Fields: Serialize + DeserializeOwned + Send + Sync;

    /// Keyspace namespace; full store keys are `<NAMESPACE>/<id>`.
    const NAMESPACE: &'static str;

    /// Compose the full store key for a caller-assigned id.
    fn key(id: &str) -> RecordKey {
        RecordKey::compose(Self::NAMESPACE, id)
    }
}

/// Field shapes that carry a transferable holder slot.
///
/// Transfer rewrites this value field only; it is not a change of
/// `owner_org`.
pub trait HolderFields {
    /// The current holder value.
    fn holder(&self) -> &str;

    /// Replace the holder value.
    fn set_holder(&mut self, new_holder: String);
}
