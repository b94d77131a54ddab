//! Error types for the entity service.

use orgledger_acl::{AclError, IdentityError};
use orgledger_core::CodecError;
use orgledger_store::StoreError;
use thiserror::Error;

/// Errors that can occur during entity service operations.
///
/// Nothing here retries; every failure aborts the invocation and surfaces
/// verbatim, with the store's atomicity guaranteeing no partial write.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Create on a key that is already present.
    #[error("record already exists: {0}")]
    AlreadyExists(String),

    /// Key absent when the operation requires presence.
    #[error("record not found: {0}")]
    NotFound(String),

    /// Guard check failed (denied, absent, or undecodable owner).
    #[error("access control: {0}")]
    Acl(#[from] AclError),

    /// Identity resolution failed.
    #[error("identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The stored record could not be encoded or decoded.
    ///
    /// Fatal for single-record reads; during a history scan a decode
    /// failure only degrades that one entry.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

impl ServiceError {
    /// True iff this failure is an ownership-or-admin denial.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, ServiceError::Acl(AclError::AccessDenied { .. }))
    }
}

/// Result type for entity service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
