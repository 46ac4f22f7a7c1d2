//! Facade crate for the OrmLink plugin and its shared modules.
//! Re-exports the domain, engine-boundary, and lifecycle crates.
//! Keep this crate thin: it should compose other crates, not implement
//! plugin logic.
//!
//! ## Usage
//! - Add `ormlink` and pull the common surface from [`prelude`].
//! - Build a lifecycle with `OrmPlugin::builder(..)`, configure scopes,
//!   initialize with adapters, and dehydrate/rehydrate to cross the
//!   server/client boundary.

pub use ormlink_domain as domain;
pub use ormlink_engine as engine;
pub use ormlink_plugin as plugin;

/// The types almost every consumer touches.
pub mod prelude {
    pub use ormlink_domain::{
        AssociationDescriptor, AssociationKind, AttributeKind, ConnectionConfig, Environment,
        ModelDefinition, Scope,
    };
    pub use ormlink_engine::{
        Adapter, AdapterInput, AdapterRef, EngineError, LiveModel, MemAdapter, MemEngine,
        OrmEngine,
    };
    pub use ormlink_plugin::{
        ActionContext, ConfigPatch, DehydratedState, ModelRegistry, OrmPlugin, Phase,
        PluginError, StoreContext, Strictness,
    };
}
