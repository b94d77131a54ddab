//! Store trait: the abstract interface for versioned key-value persistence.
//!
//! This trait keeps the access layer storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use bytes::Bytes;
use orgledger_core::TxId;

use crate::error::Result;

/// One raw entry of a key's revision log.
///
/// Produced automatically by the store on every committed `put`/`delete`.
/// The payload is opaque bytes here; decoding into records happens above
/// the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionEntry {
    /// Opaque identifier of the commit that produced this revision.
    pub tx_id: TxId,
    /// Commit time (Unix ms), non-decreasing across revisions of the key.
    pub timestamp: i64,
    /// True iff this revision removed the key.
    pub is_delete: bool,
    /// The stored bytes as of this revision; `None` for deletes.
    pub value: Option<Bytes>,
}

/// The VersionedStore trait: async interface for keyed state plus per-key
/// revision history.
///
/// All methods are async to support both sync (SQLite) and async backends.
///
/// # Design Notes
///
/// - **Atomicity**: `put` and `delete` commit the current-state change and
///   the revision-log append as one unit.
/// - **Ordering**: `scan_range` returns keys in lexicographic order;
///   `scan_history` returns revisions in commit order, oldest first.
/// - **No interpretation**: values are opaque bytes end to end.
#[async_trait]
pub trait VersionedStore: Send + Sync {
    /// Get the current value for a key, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Write the current value for a key, appending a revision.
    ///
    /// Returns the tx id of the committed revision.
    async fn put(&self, key: &str, value: &[u8]) -> Result<TxId>;

    /// Remove a key, appending a delete revision.
    ///
    /// Fails with `NotFound` if the key is absent; the revision log is
    /// left untouched in that case.
    async fn delete(&self, key: &str) -> Result<TxId>;

    /// Scan current values with `start <= key < end`, in key order.
    ///
    /// An empty `end` means unbounded.
    async fn scan_range(&self, start: &str, end: &str) -> Result<Vec<(String, Bytes)>>;

    /// Scan the full revision log of a key, oldest first.
    ///
    /// Returns an empty list for a key that has never been written.
    async fn scan_history(&self, key: &str) -> Result<Vec<RevisionEntry>>;
}

/// Extension trait for common store patterns.
pub trait StoreExt: VersionedStore {
    /// Check whether a key currently exists.
    fn exists(&self, key: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

impl<S: VersionedStore + ?Sized> StoreExt for S {
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}
