//! # Domain Models
//!
//! This crate contains the pure data model of the OrmLink protocol with
//! minimal dependencies (`serde`, `serde_json`, `fxhash`).
//! Keep it lean: no I/O, no locking, no lifecycle state—just data and the
//! pure helpers that operate on it (scope merging, association derivation).

pub mod attributes;
pub mod model;
pub mod scope;

pub use attributes::{
    AssociationDescriptor, AssociationKind, AttributeKind, AttributeSpec, attribute_kind,
    derive_associations,
};
pub use model::{ConnectionConfig, HookFn, ModelDefinition, ModelHooks};
pub use scope::{Environment, Scope, deep_merge};
