//! # Orgledger Store
//!
//! Versioned key-value storage for orgledger. Provides a trait-based
//! interface with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The store abstracts persistence behind the [`VersionedStore`] trait,
//! keeping the access layer storage-agnostic. The primary implementation
//! is [`SqliteStore`], with [`MemoryStore`] for testing.
//!
//! Every committed `put` or `delete` appends an immutable entry to the
//! key's revision log as a side effect; `scan_history` replays that log in
//! commit order.
//!
//! ## Key Types
//!
//! - [`VersionedStore`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`RevisionEntry`] - One raw entry of a key's revision log
//!
//! ## Design Notes
//!
//! - **Atomic commits**: current state and the revision log move together
//!   or not at all, so a failed operation leaves no partial write
//! - **Monotonic timestamps**: per-key commit times never decrease
//! - **Opaque tx ids**: each revision carries a store-derived [`TxId`]
//!
//! [`TxId`]: orgledger_core::TxId

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{RevisionEntry, StoreExt, VersionedStore};
