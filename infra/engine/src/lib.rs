//! # ORM Engine Boundary
//!
//! This crate defines the interface between the OrmLink lifecycle and the
//! external ORM engine that actually owns schema reconciliation, query
//! execution, and storage drivers.
//!
//! ## Key Pieces
//! - [`OrmEngine`]: the asynchronous engine contract (register, initialize,
//!   teardown). The lifecycle constructs one fresh instance per
//!   initialization and drops it on teardown.
//! - [`Adapter`]: an opaque storage driver, identified by its identity
//!   string, supplied only at initialization time.
//! - [`normalize_adapters`]: turns either adapter input shape (list or
//!   identity-keyed map) into the canonical map.
//! - [`MemEngine`] / [`MemAdapter`]: a real in-memory engine pair filling
//!   the role an embedded `mem://` database engine fills elsewhere—tests
//!   and demos run against it without external processes.
//!
//! ## Example
//!
//! ```rust
//! use ormlink_domain::{ConnectionConfig, ModelDefinition};
//! use ormlink_engine::{AdapterInput, EngineError, MemAdapter, MemEngine, OrmEngine};
//! use std::sync::Arc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), EngineError> {
//!     let mut engine = MemEngine::new();
//!     engine.register_model(ModelDefinition::new("user", "mem"))?;
//!
//!     let adapters = ormlink_engine::normalize_adapters(AdapterInput::from(vec![
//!         Arc::new(MemAdapter::new("memAdapter")) as ormlink_engine::AdapterRef,
//!     ]))?;
//!     let mut connections = fxhash::FxHashMap::default();
//!     connections.insert(
//!         "mem".to_owned(),
//!         ConnectionConfig { adapter: "memAdapter".to_owned(), ..ConnectionConfig::default() },
//!     );
//!
//!     let models = engine.initialize(adapters, connections).await?;
//!     assert_eq!(models.len(), 1);
//!     engine.teardown().await?;
//!     Ok(())
//! }
//! ```

mod adapter;
mod engine;
mod error;
mod memory;

pub use adapter::{Adapter, AdapterInput, AdapterMap, AdapterRef, normalize_adapters};
pub use engine::{LiveModel, OrmEngine};
pub use error::{EngineError, EngineErrorExt};
pub use memory::{MemAdapter, MemEngine};
