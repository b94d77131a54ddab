//! # Orgledger ACL
//!
//! Identity resolution and the ownership-or-admin access guard.
//!
//! ## Overview
//!
//! Two pieces live here:
//!
//! - **Identity resolution**: turning an invocation context (whatever the
//!   transport hands us, abstracted as [`IdentityProvider`]) into an
//!   explicit [`CallerIdentity`] capability, once per invocation.
//! - **The guard**: the single authorization predicate of the whole
//!   system, `is_admin || caller.org == record.owner_org`, evaluated
//!   fresh against the stored owner on every call.
//!
//! The guard holds no state and caches no decisions. Ownership is set once
//! at creation, but admin status comes from the live invocation context,
//! so every check re-reads both.
//!
//! ## Read gating
//!
//! Reads are ownership-scoped too: [`guard::authorize_read`] applies the
//! identical predicate before a record or its history is exposed. The only
//! unscoped surface is the bulk list operation, which lives above this
//! crate and deliberately skips the guard.
//!
//! [`CallerIdentity`]: orgledger_core::CallerIdentity

pub mod error;
pub mod guard;
pub mod resolver;

pub use error::{AclError, IdentityError, Result};
pub use guard::{authorize_history, authorize_mutation, authorize_read};
pub use resolver::{resolve_identity, IdentityProvider, ADMIN_ATTRIBUTE, ADMIN_VALUE};
