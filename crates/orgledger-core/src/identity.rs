//! The resolved caller identity.
//!
//! Resolution from an invocation context happens in `orgledger-acl`; this
//! is just the capability that comes out of it, passed explicitly to every
//! operation instead of being re-queried ad hoc.

use crate::types::OrgId;

/// The identity on whose behalf an invocation executes.
///
/// Resolved once per invocation. `is_admin` must be re-derived from the
/// live invocation context every time; it is never cached across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    /// The caller's organizational identity.
    pub org: OrgId,
    /// Whether the caller carries the admin capability.
    pub is_admin: bool,
}

impl CallerIdentity {
    /// An ordinary member of `org`.
    pub fn member(org: impl Into<OrgId>) -> Self {
        Self {
            org: org.into(),
            is_admin: false,
        }
    }

    /// An admin acting on behalf of `org`.
    pub fn admin(org: impl Into<OrgId>) -> Self {
        Self {
            org: org.into(),
            is_admin: true,
        }
    }
}
