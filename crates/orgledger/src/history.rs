//! The history auditor: a typed, ordered view of a key's revision log.
//!
//! Gating first, then a single pass over the store's revision scan in its
//! native commit order. Decoding is best-effort per entry: one malformed
//! snapshot degrades that entry to `Unreadable` instead of failing the
//! whole audit.

use orgledger_acl::guard;
use orgledger_core::{decode_record, CallerIdentity, RecordKey, Revision, RevisionValue};
use orgledger_store::VersionedStore;

use crate::error::Result;

/// Read the full revision history of `key`, oldest first.
///
/// The caller must pass the read gate against the current owner; for a
/// deleted key, against the owner at the latest decodable snapshot. No
/// reordering, no deduplication: the list mirrors the store's commit
/// order exactly.
pub async fn read_history<S, F>(
    store: &S,
    key: &RecordKey,
    caller: &CallerIdentity,
) -> Result<Vec<Revision<F>>>
where
    S: VersionedStore,
    F: serde::de::DeserializeOwned,
{
    guard::authorize_history(store, key, caller).await?;

    let raw = store.scan_history(key.as_str()).await?;
    let mut revisions = Vec::with_capacity(raw.len());

    for entry in raw {
        let value = if entry.is_delete {
            RevisionValue::Deleted
        } else {
            match entry.value {
                Some(bytes) => match decode_record::<F>(&bytes) {
                    Ok(record) => RevisionValue::Snapshot(record),
                    Err(err) => {
                        tracing::warn!(
                            key = %key,
                            tx_id = %entry.tx_id,
                            error = %err,
                            "undecodable snapshot in history, emitting raw"
                        );
                        RevisionValue::Unreadable(bytes)
                    }
                },
                // A live revision with no payload should not happen; keep
                // the entry rather than inventing a snapshot.
                None => RevisionValue::Unreadable(bytes::Bytes::new()),
            }
        };

        revisions.push(Revision {
            tx_id: entry.tx_id,
            timestamp: entry.timestamp,
            value,
        });
    }

    Ok(revisions)
}
