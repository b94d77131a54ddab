//! Proptest generators for property-based testing.

use proptest::prelude::*;

use orgledger_core::{CallerIdentity, OrgId};

use crate::fixtures::{AssetFields, ModuleFields};

/// Generate a plausible org name.
pub fn org_id() -> impl Strategy<Value = OrgId> {
    "[A-Z][a-z]{2,8}Org".prop_map(OrgId::new)
}

/// Generate a caller identity, admin or not.
pub fn caller() -> impl Strategy<Value = CallerIdentity> {
    (org_id(), any::<bool>()).prop_map(|(org, is_admin)| CallerIdentity { org, is_admin })
}

/// Generate a caller-assigned record id.
pub fn record_id() -> impl Strategy<Value = String> {
    "[a-z0-9]{1,16}"
}

/// Generate asset domain fields.
pub fn asset_fields() -> impl Strategy<Value = AssetFields> {
    (
        "[a-z]{3,8}",
        any::<u32>(),
        "[a-z]{3,10}",
        0u32..1_000_000,
    )
        .prop_map(|(color, size, holder, appraised_value)| AssetFields {
            color,
            size,
            holder,
            appraised_value,
        })
}

/// Generate module domain fields.
pub fn module_fields() -> impl Strategy<Value = ModuleFields> {
    ("[0-9]\\.[0-9]", "[a-f0-9]{16}", "[a-z]{3,8}")
        .prop_map(|(version, hash, name)| ModuleFields {
            version,
            hash,
            uri: format!("file:///modules/{}", name),
        })
}
