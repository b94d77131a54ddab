//! Identity resolution: from invocation context to an explicit capability.
//!
//! The transport layer (certificate parsing, attribute extraction) is an
//! external collaborator; we consume it through [`IdentityProvider`] and
//! resolve a [`CallerIdentity`] once per invocation.

use orgledger_core::{CallerIdentity, OrgId};

use crate::error::IdentityError;

/// Attribute name that marks an admin identity.
pub const ADMIN_ATTRIBUTE: &str = "role";

/// Attribute value that marks an admin identity.
pub const ADMIN_VALUE: &str = "admin";

/// The external identity layer, already past certificate mechanics.
pub trait IdentityProvider {
    /// The org on whose behalf this invocation executes.
    fn caller_org(&self) -> Result<OrgId, IdentityError>;

    /// Whether the caller carries attribute `name` with value `expected`.
    ///
    /// Absence of the attribute is `false`, never an error.
    fn caller_has_attribute(&self, name: &str, expected: &str) -> bool;
}

/// Resolve the caller identity from a provider.
///
/// Fails with [`IdentityError::Unavailable`] when no org is resolvable.
/// The admin flag is re-derived from the live context on every call;
/// attribute absence or mismatch yields `false`, never an error.
pub fn resolve_identity<P: IdentityProvider>(provider: &P) -> Result<CallerIdentity, IdentityError> {
    let org = provider.caller_org()?;
    let is_admin = provider.caller_has_attribute(ADMIN_ATTRIBUTE, ADMIN_VALUE);
    Ok(CallerIdentity { org, is_admin })
}
