//! Typed revision history entries.
//!
//! The store hands back raw per-key revision logs; the auditor decodes each
//! entry into a [`Revision`]. A revision whose payload no longer decodes is
//! degraded to [`RevisionValue::Unreadable`] rather than failing the scan.

use bytes::Bytes;

use crate::record::Record;
use crate::types::TxId;

/// The decoded state carried by one revision.
#[derive(Debug, Clone, PartialEq)]
pub enum RevisionValue<F> {
    /// The record as of this revision.
    Snapshot(Record<F>),
    /// Payload present but undecodable; raw bytes preserved for forensics.
    Unreadable(Bytes),
    /// This revision removed the key.
    Deleted,
}

/// One immutable entry of a key's revision history, oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Revision<F> {
    /// Opaque identifier of the commit that produced this revision.
    pub tx_id: TxId,
    /// Commit time assigned by the store (Unix ms), non-decreasing per key.
    pub timestamp: i64,
    /// What this revision did to the key.
    pub value: RevisionValue<F>,
}

impl<F> Revision<F> {
    /// True iff this revision removed the key.
    pub fn is_delete(&self) -> bool {
        matches!(self.value, RevisionValue::Deleted)
    }

    /// The decoded record, if this revision carries one.
    pub fn snapshot(&self) -> Option<&Record<F>> {
        match &self.value {
            RevisionValue::Snapshot(record) => Some(record),
            _ => None,
        }
    }
}
