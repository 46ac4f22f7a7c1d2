//! The asynchronous engine contract and the live model it produces.

use crate::adapter::AdapterMap;
use crate::error::EngineError;
use fxhash::FxHashMap;
use ormlink_domain::{AssociationDescriptor, ConnectionConfig, ModelDefinition};
use serde_json::{Map, Value};
use std::future::Future;

/// A live, query-capable model materialized by the ORM engine.
///
/// The attribute map is the *resolved* one—the engine may have injected
/// fields (primary keys, timestamps) that never appeared in the authored
/// definition. `associations` is attached by the build step after the
/// engine hands the model back; the engine itself leaves it empty.
#[derive(Debug, Clone)]
pub struct LiveModel {
    pub identity: String,
    pub global_id: Option<String>,
    pub connection: String,
    pub attributes: Map<String, Value>,
    pub associations: Vec<AssociationDescriptor>,
}

impl LiveModel {
    /// Seeds a live model from a definition; attributes are taken as-is
    /// and association decoration is left to the caller.
    #[must_use]
    pub fn from_definition(definition: &ModelDefinition) -> Self {
        Self {
            identity: definition.identity.clone(),
            global_id: definition.global_id.clone(),
            connection: definition.connection.clone(),
            attributes: definition.attributes.clone(),
            associations: Vec::new(),
        }
    }
}

/// The external ORM engine contract.
///
/// One engine instance serves exactly one initialize/teardown cycle. The
/// lifecycle constructs a fresh instance per initialization, never calls
/// `initialize` or `teardown` concurrently on it, and drops it after a
/// successful teardown.
pub trait OrmEngine: Send {
    /// Registers a model definition. The last registration for an identity
    /// wins, mirroring configuration merge policy.
    fn register_model(&mut self, definition: ModelDefinition) -> Result<(), EngineError>;

    /// Binds adapters to connections and materializes every registered
    /// definition into a live model. May perform schema reconciliation or
    /// migrations; runs to completion or failure, no cancellation.
    fn initialize(
        &mut self,
        adapters: AdapterMap,
        connections: FxHashMap<String, ConnectionConfig>,
    ) -> impl Future<Output = Result<Vec<LiveModel>, EngineError>> + Send;

    /// Releases adapters and connections. After a successful teardown the
    /// engine holds no registrations.
    fn teardown(&mut self) -> impl Future<Output = Result<(), EngineError>> + Send;
}
