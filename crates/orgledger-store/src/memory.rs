//! In-memory implementation of the VersionedStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;

use orgledger_core::TxId;

use crate::error::{Result, StoreError};
use crate::traits::{RevisionEntry, VersionedStore};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock;
/// each operation commits under a single write-lock scope, which stands in
/// for the transactional unit of the SQLite backend.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Current state, ordered by key for range scans.
    current: BTreeMap<String, Bytes>,

    /// Per-key revision logs, append-only, commit order.
    revisions: HashMap<String, Vec<RevisionEntry>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                current: BTreeMap::new(),
                revisions: HashMap::new(),
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStoreInner {
    /// Append a revision for `key`, clamping the timestamp so it never
    /// goes backwards within the key's log.
    fn append_revision(&mut self, key: &str, is_delete: bool, value: Option<Bytes>) -> TxId {
        let log = self.revisions.entry(key.to_string()).or_default();
        let seq = log.len() as u64 + 1;
        let last_ts = log.last().map(|r| r.timestamp).unwrap_or(i64::MIN);
        let timestamp = now_millis().max(last_ts);
        let tx_id = TxId::derive(key, seq, timestamp);

        log.push(RevisionEntry {
            tx_id: tx_id.clone(),
            timestamp,
            is_delete,
            value,
        });

        tx_id
    }
}

#[async_trait]
impl VersionedStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.current.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<TxId> {
        let mut inner = self.inner.write().unwrap();

        let bytes = Bytes::copy_from_slice(value);
        inner.current.insert(key.to_string(), bytes.clone());
        Ok(inner.append_revision(key, false, Some(bytes)))
    }

    async fn delete(&self, key: &str) -> Result<TxId> {
        let mut inner = self.inner.write().unwrap();

        if inner.current.remove(key).is_none() {
            return Err(StoreError::NotFound(key.to_string()));
        }
        Ok(inner.append_revision(key, true, None))
    }

    async fn scan_range(&self, start: &str, end: &str) -> Result<Vec<(String, Bytes)>> {
        let inner = self.inner.read().unwrap();

        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end)
        };

        Ok(inner
            .current
            .range::<str, _>((Bound::Included(start), upper))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn scan_history(&self, key: &str) -> Result<Vec<RevisionEntry>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.revisions.get(key).cloned().unwrap_or_default())
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
