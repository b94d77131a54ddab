//! Error types for the ACL module.

use orgledger_core::{CodecError, OrgId};
use orgledger_store::StoreError;
use thiserror::Error;

/// Errors from identity resolution.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The invocation context carries no resolvable organizational identity.
    #[error("no organizational identity in invocation context")]
    Unavailable,
}

/// Errors that can occur during guard checks.
#[derive(Debug, Error)]
pub enum AclError {
    /// The record does not exist, so there is no owner to check against.
    ///
    /// Surfaced distinctly so callers can tell "doesn't exist" from
    /// "exists but forbidden".
    #[error("record not found: {0}")]
    NotFound(String),

    /// The ownership-or-admin predicate is false for this caller.
    #[error("access denied: caller org {caller_org} may not act on record owned by {owner_org}")]
    AccessDenied {
        /// The org the caller presented.
        caller_org: OrgId,
        /// The org that owns the record.
        owner_org: OrgId,
    },

    /// Identity resolution failed.
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Storage error while loading the record.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The stored envelope could not be decoded.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Result type for ACL operations.
pub type Result<T> = std::result::Result<T, AclError>;
