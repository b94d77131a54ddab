//! The entity service: orchestration of guard checks and store operations.
//!
//! Every operation runs the same strict sequence: resolve nothing itself
//! (identity arrives as an explicit [`CallerIdentity`]), apply the guard
//! where the operation is protected, then perform exactly one logical
//! store operation. A denied guard check aborts before anything is
//! written.

use std::marker::PhantomData;
use std::sync::Arc;

use orgledger_acl::guard;
use orgledger_core::{
    decode_record, encode_record, CallerIdentity, EntityKind, HolderFields, Record, Revision, TxId,
};
use orgledger_store::{StoreExt, VersionedStore};

use crate::error::{Result, ServiceError};
use crate::history;

/// The entity service for one entity kind over one store.
///
/// Stateless apart from the store handle: every decision is a fresh
/// function of store content and the caller identity, so independent
/// service instances over the same store agree by construction.
pub struct EntityService<S, K> {
    store: Arc<S>,
    _kind: PhantomData<fn() -> K>,
}

impl<S: VersionedStore, K: EntityKind> EntityService<S, K> {
    /// Create a service owning its store.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
            _kind: PhantomData,
        }
    }

    /// Create a service over a shared store.
    ///
    /// Lets several entity kinds run over one backend.
    pub fn from_shared(store: Arc<S>) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a new record with `id`, owned by the caller's org.
    ///
    /// Fails with `AlreadyExists` if the key is present. No ownership
    /// check applies: creating a fresh key is how ownership is acquired.
    pub async fn create(
        &self,
        caller: &CallerIdentity,
        id: &str,
        fields: K::Fields,
    ) -> Result<TxId> {
        let key = K::key(id);

        if self.store.exists(key.as_str()).await? {
            return Err(ServiceError::AlreadyExists(key.to_string()));
        }

        let record = Record::new(id, caller.org.clone(), fields);
        let bytes = encode_record(&record)?;
        tracing::debug!(key = %key, owner = %caller.org, "creating record");
        Ok(self.store.put(key.as_str(), &bytes).await?)
    }

    /// Read the current record for `id`.
    ///
    /// Ownership-scoped: a caller who is neither admin nor the owning org
    /// is denied here just as at write time. Never mutates anything.
    pub async fn read(&self, caller: &CallerIdentity, id: &str) -> Result<Record<K::Fields>> {
        let key = K::key(id);
        guard::authorize_read(self.store.as_ref(), &key, caller).await?;

        let bytes = self
            .store
            .get(key.as_str())
            .await?
            .ok_or_else(|| ServiceError::NotFound(key.to_string()))?;
        Ok(decode_record(&bytes)?)
    }

    /// Replace the domain fields of an existing record.
    ///
    /// `owner_org` is carried over from the current record; `updated_by`
    /// becomes the caller's org.
    pub async fn update(
        &self,
        caller: &CallerIdentity,
        id: &str,
        fields: K::Fields,
    ) -> Result<TxId> {
        let key = K::key(id);
        guard::authorize_mutation(self.store.as_ref(), &key, caller).await?;

        let current = self.load(&key).await?;
        let next = current.rewrite(fields, caller.org.clone());
        let bytes = encode_record(&next)?;
        Ok(self.store.put(key.as_str(), &bytes).await?)
    }

    /// Remove an existing record.
    pub async fn delete(&self, caller: &CallerIdentity, id: &str) -> Result<TxId> {
        let key = K::key(id);
        guard::authorize_mutation(self.store.as_ref(), &key, caller).await?;
        Ok(self.store.delete(key.as_str()).await?)
    }

    /// Check whether a record with `id` exists.
    pub async fn exists(&self, id: &str) -> Result<bool> {
        let key = K::key(id);
        Ok(self.store.exists(key.as_str()).await?)
    }

    /// Return every record of this kind, in key order.
    ///
    /// Intentionally unscoped: a bulk inventory scan, with no per-record
    /// guard applied. Distinct from single-key `read`, which is gated.
    pub async fn list_all(&self) -> Result<Vec<Record<K::Fields>>> {
        let start = format!("{}/", K::NAMESPACE);
        // '0' is the successor of '/' in ASCII, bounding the namespace.
        let end = format!("{}0", K::NAMESPACE);

        let mut records = Vec::new();
        for (_, bytes) in self.store.scan_range(&start, &end).await? {
            records.push(decode_record(&bytes)?);
        }
        Ok(records)
    }

    /// Return the full ordered revision history for `id`, oldest first.
    pub async fn history(
        &self,
        caller: &CallerIdentity,
        id: &str,
    ) -> Result<Vec<Revision<K::Fields>>> {
        let key = K::key(id);
        history::read_history(self.store.as_ref(), &key, caller).await
    }

    /// Load and decode the current record, which must exist.
    async fn load(&self, key: &orgledger_core::RecordKey) -> Result<Record<K::Fields>> {
        let bytes = self
            .store
            .get(key.as_str())
            .await?
            .ok_or_else(|| ServiceError::NotFound(key.to_string()))?;
        Ok(decode_record(&bytes)?)
    }
}

impl<S: VersionedStore, K: EntityKind> EntityService<S, K>
where
    K::Fields: HolderFields,
{
    /// Rewrite the holder value field of an existing record.
    ///
    /// This mutates a domain field only; it is not a change of
    /// `owner_org`, which is preserved like any other update.
    pub async fn transfer_holder(
        &self,
        caller: &CallerIdentity,
        id: &str,
        new_holder: &str,
    ) -> Result<TxId> {
        let key = K::key(id);
        guard::authorize_mutation(self.store.as_ref(), &key, caller).await?;

        let current = self.load(&key).await?;
        let mut fields = current.fields;
        fields.set_holder(new_holder.to_string());

        let next = Record {
            id: current.id,
            owner_org: current.owner_org,
            updated_by: caller.org.clone(),
            fields,
        };
        let bytes = encode_record(&next)?;
        Ok(self.store.put(key.as_str(), &bytes).await?)
    }
}
