//! In-memory engine and adapter, the embedded `mem://` analog.

use crate::adapter::{Adapter, AdapterMap};
use crate::engine::{LiveModel, OrmEngine};
use crate::error::EngineError;
use fxhash::FxHashMap;
use ormlink_domain::{ConnectionConfig, ModelDefinition};
use serde_json::json;
use tracing::{debug, info};

/// The attribute the engine injects when a definition declares no primary key.
const PRIMARY_KEY: &str = "id";

/// An in-memory ORM engine.
///
/// It performs the same moves a real engine performs—connection/adapter
/// validation, attribute resolution with engine-injected fields, explicit
/// teardown—without any storage behind it, which makes it the engine of
/// choice for tests and demos.
#[derive(Debug, Default)]
pub struct MemEngine {
    definitions: Vec<ModelDefinition>,
    connected: Vec<String>,
}

impl MemEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adapter identities bound by the last successful initialization.
    #[must_use]
    pub fn connected_adapters(&self) -> &[String] {
        &self.connected
    }

    /// Definitions currently registered, in registration order.
    #[must_use]
    pub fn registered(&self) -> &[ModelDefinition] {
        &self.definitions
    }
}

impl OrmEngine for MemEngine {
    fn register_model(&mut self, definition: ModelDefinition) -> Result<(), EngineError> {
        match self.definitions.iter_mut().find(|d| d.identity == definition.identity) {
            Some(slot) => *slot = definition,
            None => self.definitions.push(definition),
        }
        Ok(())
    }

    async fn initialize(
        &mut self,
        adapters: AdapterMap,
        connections: FxHashMap<String, ConnectionConfig>,
    ) -> Result<Vec<LiveModel>, EngineError> {
        for (name, connection) in &connections {
            let adapter = adapters.get(&connection.adapter).ok_or_else(|| {
                EngineError::Initialization {
                    message: format!(
                        "Connection '{name}' references unknown adapter '{}'",
                        connection.adapter
                    )
                    .into(),
                    context: None,
                }
            })?;
            debug!(connection = %name, adapter = %adapter.identity(), "Adapter bound");
        }

        let mut models = Vec::with_capacity(self.definitions.len());
        for definition in &self.definitions {
            if !connections.contains_key(&definition.connection) {
                return Err(EngineError::Initialization {
                    message: format!(
                        "Model '{}' references unknown connection '{}'",
                        definition.identity, definition.connection
                    )
                    .into(),
                    context: None,
                });
            }

            let mut model = LiveModel::from_definition(definition);
            if !model.attributes.contains_key(PRIMARY_KEY) {
                model.attributes.insert(PRIMARY_KEY.to_owned(), json!({ "type": "string" }));
            }
            models.push(model);
        }

        self.connected = adapters.keys().cloned().collect();
        info!(models = models.len(), adapters = self.connected.len(), "In-memory engine initialized");
        Ok(models)
    }

    async fn teardown(&mut self) -> Result<(), EngineError> {
        debug!(adapters = self.connected.len(), "In-memory engine torn down");
        self.definitions.clear();
        self.connected.clear();
        Ok(())
    }
}

/// The trivial named adapter for [`MemEngine`].
#[derive(Debug, Clone)]
pub struct MemAdapter {
    identity: String,
}

impl MemAdapter {
    #[must_use]
    pub fn new(identity: impl Into<String>) -> Self {
        Self { identity: identity.into() }
    }
}

impl Adapter for MemAdapter {
    fn identity(&self) -> &str {
        &self.identity
    }
}
