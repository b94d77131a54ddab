//! The access control guard.
//!
//! One predicate gates every protected operation:
//! `caller.is_admin || caller.org == record.owner_org`.
//!
//! The guard is a pure function of the stored owner and the caller
//! identity, evaluated fresh on every call. It performs no locking and
//! mutates nothing; a denial leaves the store exactly as it found it.

use orgledger_core::{decode_owner, CallerIdentity, OrgId, RecordKey};
use orgledger_store::VersionedStore;

use crate::error::{AclError, Result};

/// Authorize a mutation (update, delete, transfer) of `key`.
///
/// Loads the current record; absence is [`AclError::NotFound`], so callers
/// can distinguish "doesn't exist" from "exists but forbidden".
pub async fn authorize_mutation<S: VersionedStore>(
    store: &S,
    key: &RecordKey,
    caller: &CallerIdentity,
) -> Result<()> {
    let owner = current_owner(store, key).await?;
    check(key, &owner, caller)
}

/// Authorize exposing the current record for `key` to the caller.
///
/// Identical predicate to [`authorize_mutation`]; reads are strictly
/// ownership-scoped, not public.
pub async fn authorize_read<S: VersionedStore>(
    store: &S,
    key: &RecordKey,
    caller: &CallerIdentity,
) -> Result<()> {
    let owner = current_owner(store, key).await?;
    check(key, &owner, caller)
}

/// Authorize exposing the revision history of `key` to the caller.
///
/// Uses the current record's owner when the key is live. When the key has
/// been deleted, the owner recorded at the latest decodable snapshot keeps
/// audit access; a key with no decodable revision at all is `NotFound`.
pub async fn authorize_history<S: VersionedStore>(
    store: &S,
    key: &RecordKey,
    caller: &CallerIdentity,
) -> Result<()> {
    if let Some(bytes) = store.get(key.as_str()).await? {
        let owner = decode_owner(&bytes)?;
        return check(key, &owner, caller);
    }

    // Deleted (or never-written) key: fall back to the last snapshot that
    // still decodes, newest first.
    let history = store.scan_history(key.as_str()).await?;
    let owner = history
        .iter()
        .rev()
        .filter_map(|entry| entry.value.as_deref())
        .find_map(|bytes| decode_owner(bytes).ok());

    match owner {
        Some(owner) => check(key, &owner, caller),
        None => Err(AclError::NotFound(key.to_string())),
    }
}

/// Load and decode the owning org of the current record for `key`.
async fn current_owner<S: VersionedStore>(store: &S, key: &RecordKey) -> Result<OrgId> {
    let bytes = store
        .get(key.as_str())
        .await?
        .ok_or_else(|| AclError::NotFound(key.to_string()))?;
    Ok(decode_owner(&bytes)?)
}

/// The ownership-or-admin predicate.
fn check(key: &RecordKey, owner: &OrgId, caller: &CallerIdentity) -> Result<()> {
    if caller.is_admin || caller.org == *owner {
        return Ok(());
    }

    tracing::debug!(
        key = %key,
        caller_org = %caller.org,
        owner_org = %owner,
        "access denied"
    );
    Err(AclError::AccessDenied {
        caller_org: caller.org.clone(),
        owner_org: owner.clone(),
    })
}
