//! # Orgledger Core
//!
//! Pure primitives for orgledger: records, revisions, and organizational
//! identities.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over the data shapes the rest of the workspace moves around.
//!
//! ## Key Types
//!
//! - [`Record`] - The stored envelope: id, owning org, last writer, domain fields
//! - [`OrgId`] - Organizational identity, the unit of ownership
//! - [`TxId`] - Opaque identifier of the commit that produced a revision
//! - [`Revision`] - One decoded entry of a key's revision history
//! - [`EntityKind`] - Parameterizes the generic entity pipeline by field shape
//!
//! ## Encoding
//!
//! Records are encoded as CBOR. See the [`codec`] module.

pub mod codec;
pub mod error;
pub mod identity;
pub mod record;
pub mod revision;
pub mod types;

pub use codec::{decode_owner, decode_record, encode_record};
pub use error::CodecError;
pub use identity::CallerIdentity;
pub use record::{EntityKind, HolderFields, Record};
pub use revision::{Revision, RevisionValue};
pub use types::{OrgId, RecordKey, TxId};
