//! Test fixtures and helpers.
//!
//! Common setup code for integration tests: two sample entity kinds with
//! different field shapes, a value-backed identity provider, and a shared
//! in-memory store with a service per kind.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use orgledger_acl::{IdentityProvider, IdentityError, ADMIN_ATTRIBUTE, ADMIN_VALUE};
use orgledger_core::{CallerIdentity, EntityKind, HolderFields, OrgId};
use orgledger_store::MemoryStore;
use orgledger::EntityService;

/// Domain fields of the asset sample kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetFields {
    pub color: String,
    pub size: u32,
    pub holder: String,
    pub appraised_value: u32,
}

impl HolderFields for AssetFields {
    fn holder(&self) -> &str {
        &self.holder
    }

    fn set_holder(&mut self, new_holder: String) {
        self.holder = new_holder;
    }
}

/// The asset sample kind.
pub struct AssetEntity;

impl EntityKind for AssetEntity {
    type Fields = AssetFields;
    const NAMESPACE: &'static str = "asset";
}

/// Domain fields of the module sample kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleFields {
    pub version: String,
    pub hash: String,
    pub uri: String,
}

/// The module sample kind. No holder slot, so no transfer surface.
pub struct ModuleEntity;

impl EntityKind for ModuleEntity {
    type Fields = ModuleFields;
    const NAMESPACE: &'static str = "module";
}

/// An identity provider backed by plain values.
///
/// Stands in for the transport's certificate and attribute machinery.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    org: Option<OrgId>,
    attributes: Vec<(String, String)>,
}

impl StaticIdentity {
    /// An ordinary member of `org`.
    pub fn member(org: impl Into<OrgId>) -> Self {
        Self {
            org: Some(org.into()),
            attributes: Vec::new(),
        }
    }

    /// An admin of `org`.
    pub fn admin(org: impl Into<OrgId>) -> Self {
        Self {
            org: Some(org.into()),
            attributes: vec![(ADMIN_ATTRIBUTE.to_string(), ADMIN_VALUE.to_string())],
        }
    }

    /// A context with no resolvable org at all.
    pub fn anonymous() -> Self {
        Self {
            org: None,
            attributes: Vec::new(),
        }
    }

    /// Attach an arbitrary attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }
}

impl IdentityProvider for StaticIdentity {
    fn caller_org(&self) -> Result<OrgId, IdentityError> {
        self.org.clone().ok_or(IdentityError::Unavailable)
    }

    fn caller_has_attribute(&self, name: &str, expected: &str) -> bool {
        self.attributes
            .iter()
            .any(|(n, v)| n == name && v == expected)
    }
}

/// A shared in-memory store with one service per sample kind.
pub struct TestFixture {
    pub store: Arc<MemoryStore>,
}

impl TestFixture {
    /// Create a fresh fixture over an empty store.
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// The asset service over the shared store.
    pub fn assets(&self) -> EntityService<MemoryStore, AssetEntity> {
        EntityService::from_shared(Arc::clone(&self.store))
    }

    /// The module service over the shared store.
    pub fn modules(&self) -> EntityService<MemoryStore, ModuleEntity> {
        EntityService::from_shared(Arc::clone(&self.store))
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A member identity for `org`, resolved the explicit way.
pub fn member(org: &str) -> CallerIdentity {
    CallerIdentity::member(org)
}

/// An admin identity for `org`.
pub fn admin(org: &str) -> CallerIdentity {
    CallerIdentity::admin(org)
}
