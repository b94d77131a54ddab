//! # Orgledger Testkit
//!
//! Testing utilities for orgledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: sample entity kinds and a ready-made store plus service
//!   setup for scenario tests
//! - **Generators**: proptest strategies for property-based testing
//! - **StaticIdentity**: an [`IdentityProvider`] backed by plain values,
//!   standing in for the transport's certificate machinery
//!
//! Two sample entity kinds ship here on purpose: [`fixtures::AssetEntity`]
//! and [`fixtures::ModuleEntity`] have different field shapes but run
//! through the one generic pipeline, which is exactly the property the
//! scenario tests exercise.
//!
//! [`IdentityProvider`]: orgledger_acl::IdentityProvider

pub mod fixtures;
pub mod generators;

pub use fixtures::{AssetEntity, AssetFields, ModuleEntity, ModuleFields, StaticIdentity, TestFixture};
