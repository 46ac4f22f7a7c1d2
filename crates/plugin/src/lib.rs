//! # OrmLink Plugin Core
//!
//! The configuration lifecycle and state-transfer core: an application
//! describes model definitions and connection configs once, and this crate
//! materializes them into live model objects on two runtime environments
//! (server and client) that share no memory.
//!
//! ## Key Pieces
//! - [`ConfigMerger`]: three layered scopes (`common`/`server`/`client`)
//!   with deterministic override precedence.
//! - [`OrmPlugin`]: the initialize-once state machine driving the external
//!   engine, with dehydrate/rehydrate for crossing the environment
//!   boundary.
//! - [`ModelRegistry`]: live models indexed by identity and global-id
//!   alias.
//! - [`ActionContext`]/[`StoreContext`]: the host-application integration
//!   surface.
//!
//! ## Example
//!
//! ```rust
//! use ormlink_engine::{AdapterRef, MemAdapter, MemEngine};
//! use ormlink_plugin::{ConfigPatch, OrmPlugin, PluginError};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), PluginError> {
//!     let plugin = OrmPlugin::builder(MemEngine::new).build();
//!
//!     plugin.configure(ConfigPatch::common(json!({
//!         "models": [{
//!             "identity": "user",
//!             "globalId": "User",
//!             "connection": "mem",
//!             "attributes": { "username": { "type": "string" } }
//!         }],
//!         "connections": { "mem": { "adapter": "memAdapter" } }
//!     })))?;
//!
//!     let adapters = vec![Arc::new(MemAdapter::new("memAdapter")) as AdapterRef];
//!     plugin.initialize(adapters).await?;
//!
//!     let registry = plugin.registry();
//!     assert!(registry.has("user") && registry.has("User"));
//!
//!     plugin.tear_down().await?;
//!     assert!(registry.is_empty());
//!     Ok(())
//! }
//! ```

mod build;
mod context;
mod error;
mod lifecycle;
mod merger;
mod registry;

pub use context::{ActionContext, StoreBindings, StoreContext};
pub use error::{PluginError, PluginErrorExt};
pub use lifecycle::{ConfigPatch, DehydratedState, OrmPlugin, OrmPluginBuilder, Phase};
pub use merger::{ConfigMerger, EffectiveConfig, Strictness};
pub use registry::ModelRegistry;
