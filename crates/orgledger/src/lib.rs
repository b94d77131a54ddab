//! # Orgledger
//!
//! An ownership-guarded entity registry with full-history audit, layered
//! on a versioned key-value store.
//!
//! ## Overview
//!
//! Every mutation of a stored record is gated to the organizational
//! identity that created it, or to an admin identity. Authorized callers
//! can retrieve the complete ordered revision history of a record, not
//! just its current value.
//!
//! ## Key Concepts
//!
//! - **Record**: the stored envelope; `owner_org` is stamped at creation
//!   and never changes for the lifetime of the key.
//! - **Guard**: one predicate, `is_admin || caller.org == owner_org`,
//!   applied before every mutation and every protected read.
//! - **Revision**: an immutable history entry the store appends on every
//!   committed create/update/delete.
//! - **Entity kind**: one generic pipeline serves every record shape,
//!   parameterized by [`EntityKind`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use orgledger::{CallerIdentity, EntityKind, EntityService};
//! use orgledger::store::SqliteStore;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! struct ModuleFields {
//!     version: String,
//!     hash: String,
//!     uri: String,
//! }
//!
//! struct ModuleEntity;
//!
//! impl EntityKind for ModuleEntity {
//!     type Fields = ModuleFields;
//!     const NAMESPACE: &'static str = "module";
//! }
//!
//! async fn example() {
//!     let store = SqliteStore::open("ledger.db").unwrap();
//!     let modules: EntityService<_, ModuleEntity> = EntityService::new(store);
//!
//!     let caller = CallerIdentity::member("OrgA");
//!     modules
//!         .create(&caller, "m1", ModuleFields {
//!             version: "1.0".into(),
//!             hash: "abc".into(),
//!             uri: "file:///m1".into(),
//!         })
//!         .await
//!         .unwrap();
//!
//!     let history = modules.history(&caller, "m1").await.unwrap();
//!     assert_eq!(history.len(), 1);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `orgledger::core` - Records, revisions, identities, codec
//! - `orgledger::store` - Storage abstraction, SQLite and memory backends
//! - `orgledger::acl` - Identity resolution and the access guard

pub mod error;
pub mod history;
pub mod service;

// Re-export component crates
pub use orgledger_acl as acl;
pub use orgledger_core as core;
pub use orgledger_store as store;

// Re-export main types for convenience
pub use error::{Result, ServiceError};
pub use history::read_history;
pub use service::EntityService;

// Re-export commonly used core types
pub use orgledger_core::{
    CallerIdentity, EntityKind, HolderFields, OrgId, Record, RecordKey, Revision, RevisionValue,
    TxId,
};
