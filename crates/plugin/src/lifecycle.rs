//! The plugin lifecycle: a strict initialize-once state machine over the
//! configuration scopes, the ORM build step, and the model registry, plus
//! the dehydrate/rehydrate protocol that moves configuration between the
//! server and client environments.

use crate::build;
use crate::error::PluginError;
use crate::merger::{ConfigMerger, Strictness};
use crate::registry::ModelRegistry;
use ormlink_domain::{Environment, Scope};
use ormlink_engine::{AdapterInput, AdapterRef, LiveModel, OrmEngine};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Observable lifecycle state. A torn-down plugin reads as `Configured`:
/// configuration is retained and the lifecycle may initialize again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unconfigured,
    Configured,
    Initialized,
}

/// A configuration patch across the three scopes, each an optional JSON
/// object merged into the corresponding accumulated scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Value>,
}

impl ConfigPatch {
    #[must_use]
    pub fn common(patch: Value) -> Self {
        Self { common: Some(patch), ..Self::default() }
    }

    #[must_use]
    pub fn server(patch: Value) -> Self {
        Self { server: Some(patch), ..Self::default() }
    }

    #[must_use]
    pub fn client(patch: Value) -> Self {
        Self { client: Some(patch), ..Self::default() }
    }
}

/// The serializable configuration snapshot shipped from the server
/// environment to the client environment.
///
/// Deliberately excludes the server scope and all live state: plain JSON,
/// no functions, no model references.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DehydratedState {
    pub common: Map<String, Value>,
    pub client: Map<String, Value>,
}

/// A fluent builder for an [`OrmPlugin`].
///
/// Created by [`OrmPlugin::builder`] around the engine factory; the
/// factory is invoked once per `initialize`, so each cycle gets a fresh
/// engine instance and no engine state is shared between cycles.
#[must_use = "builders do nothing unless you call .build()"]
pub struct OrmPluginBuilder<E: OrmEngine> {
    factory: Box<dyn Fn() -> E + Send + Sync>,
    environment: Environment,
    strictness: Strictness,
    client_adapters: Option<Vec<AdapterRef>>,
}

impl<E: OrmEngine> fmt::Debug for OrmPluginBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrmPluginBuilder")
            .field("environment", &self.environment)
            .field("strictness", &self.strictness)
            .finish_non_exhaustive()
    }
}

impl<E: OrmEngine> OrmPluginBuilder<E> {
    /// Selects which scope overrides `common` when the effective
    /// configuration is computed.
    pub const fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Sets validation strictness for model normalization and registry
    /// inserts.
    pub const fn strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Adapters used by `rehydrate` to auto-initialize on the client. A
    /// deployment that does not bundle adapters omits this and calls
    /// `initialize` explicitly later.
    pub fn client_adapters(mut self, adapters: Vec<AdapterRef>) -> Self {
        self.client_adapters = Some(adapters);
        self
    }

    /// Consumes the builder and returns the lifecycle handle.
    pub fn build(self) -> OrmPlugin<E> {
        OrmPlugin {
            inner: Arc::new(PluginInner {
                environment: self.environment,
                client_adapters: self.client_adapters,
                factory: self.factory,
                merger: RwLock::new(ConfigMerger::new(self.strictness)),
                registry: ModelRegistry::new(self.strictness),
                phase: RwLock::new(Phase::Unconfigured),
                engine: Mutex::new(None),
            }),
        }
    }
}

struct PluginInner<E: OrmEngine> {
    environment: Environment,
    client_adapters: Option<Vec<AdapterRef>>,
    factory: Box<dyn Fn() -> E + Send + Sync>,
    merger: RwLock<ConfigMerger>,
    registry: ModelRegistry,
    phase: RwLock<Phase>,
    /// The engine of the current cycle. The mutex doubles as the
    /// single-flight gate: initialize/teardown take it with `try_lock`
    /// and hold it across their await points, so a concurrent second
    /// call fails fast instead of queueing.
    engine: Mutex<Option<E>>,
}

/// The ORM plugin lifecycle handle.
///
/// Internally reference-counted: clones share one lifecycle. All mutation
/// of the registry happens through the state machine below, which is what
/// keeps the registry's all-or-nothing invariant without extra locking.
pub struct OrmPlugin<E: OrmEngine> {
    inner: Arc<PluginInner<E>>,
}

impl<E: OrmEngine> Clone for OrmPlugin<E> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<E: OrmEngine> fmt::Debug for OrmPlugin<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrmPlugin")
            .field("environment", &self.inner.environment)
            .field("phase", &self.phase())
            .field("models", &self.inner.registry.len())
            .finish_non_exhaustive()
    }
}

impl<E: OrmEngine> OrmPlugin<E> {
    /// Starts a builder around an engine factory.
    pub fn builder(factory: impl Fn() -> E + Send + Sync + 'static) -> OrmPluginBuilder<E> {
        OrmPluginBuilder {
            factory: Box::new(factory),
            environment: Environment::Server,
            strictness: Strictness::default(),
            client_adapters: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        *self.inner.phase.read()
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.inner.environment
    }

    /// A cheap handle to the live-model registry.
    #[must_use]
    pub fn registry(&self) -> ModelRegistry {
        self.inner.registry.clone()
    }

    /// Merges a patch into the accumulated configuration scopes.
    ///
    /// Valid only while the registry is empty; returns `self` for
    /// chaining.
    ///
    /// # Errors
    /// [`PluginError::AlreadyInitialized`] while live models are
    /// registered; merge errors per [`ConfigMerger::merge_scope`].
    pub fn configure(&self, patch: ConfigPatch) -> Result<&Self, PluginError> {
        if !self.inner.registry.is_empty() {
            return Err(PluginError::AlreadyInitialized {
                message: "Configuration is frozen while live models are registered".into(),
                context: None,
            });
        }

        {
            let mut merger = self.inner.merger.write();
            if let Some(common) = patch.common {
                merger.merge_scope(Scope::Common, common)?;
            }
            if let Some(server) = patch.server {
                merger.merge_scope(Scope::Server, server)?;
            }
            if let Some(client) = patch.client {
                merger.merge_scope(Scope::Client, client)?;
            }
        }

        let mut phase = self.inner.phase.write();
        if *phase == Phase::Unconfigured {
            *phase = Phase::Configured;
        }
        Ok(self)
    }

    /// Registers a named lifecycle hook for a model identity; attached to
    /// the definition when the effective configuration is computed.
    pub fn model_hook(
        &self,
        identity: impl Into<String>,
        name: impl Into<String>,
        hook: impl Fn(&mut Value) + Send + Sync + 'static,
    ) -> Result<&Self, PluginError> {
        self.inner.merger.write().model_hook(identity, name, Arc::new(hook))?;
        Ok(self)
    }

    /// Computes the effective configuration for this environment, builds
    /// the ORM on a fresh engine instance, and commits the result.
    ///
    /// Commit is all-or-nothing: on any failure the phase, registry, and
    /// configuration lock are left exactly as they were, so the caller may
    /// correct configuration and retry.
    ///
    /// # Errors
    /// [`PluginError::OperationInFlight`] if another initialize/teardown
    /// is pending; [`PluginError::AlreadyInitialized`] in `Initialized`;
    /// [`PluginError::Validation`] when never configured;
    /// [`PluginError::Engine`] wrapping any engine failure, cause intact.
    #[instrument(skip(self, adapters), fields(environment = %self.inner.environment))]
    pub async fn initialize(&self, adapters: impl Into<AdapterInput>) -> Result<(), PluginError> {
        let mut slot = self.inner.engine.try_lock().map_err(|_| {
            PluginError::OperationInFlight {
                message: "Another initialize or teardown is pending".into(),
                context: None,
            }
        })?;

        match self.phase() {
            Phase::Initialized => {
                return Err(PluginError::AlreadyInitialized {
                    message: "Initialize requires an intervening teardown".into(),
                    context: None,
                });
            },
            Phase::Unconfigured => {
                return Err(PluginError::Validation {
                    message: "Initialize requires prior configuration".into(),
                    context: None,
                });
            },
            Phase::Configured => {},
        }

        let effective = {
            let merger = self.inner.merger.read();
            merger.effective(self.inner.environment)?
        };

        let mut engine = (self.inner.factory)();
        let models = build::build(&mut engine, effective, adapters.into()).await?;
        let count = self.inner.registry.set(models)?;

        *slot = Some(engine);
        self.inner.merger.write().lock();
        *self.inner.phase.write() = Phase::Initialized;
        info!(models = count, "ORM initialized");
        Ok(())
    }

    /// Merges externally-sourced live models directly into the registry,
    /// bypassing the engine — the integration seam for a host that already
    /// owns an initialized engine instance. Marks the lifecycle
    /// `Initialized` and locks configuration.
    pub fn set_external_models(
        &self,
        models: impl IntoIterator<Item = LiveModel>,
    ) -> Result<(), PluginError> {
        let count = self.inner.registry.set(models.into_iter().map(Arc::new))?;
        self.inner.merger.write().lock();
        *self.inner.phase.write() = Phase::Initialized;
        debug!(models = count, "External live models registered");
        Ok(())
    }

    /// Tears the ORM down: engine teardown first, then the registry is
    /// cleared and configuration reopened. Configuration itself is
    /// retained, so the lifecycle may initialize again.
    ///
    /// A failed engine teardown leaves the engine and registry in place —
    /// teardown is not assumed to have succeeded until it reports success.
    /// Calling this on a never-initialized lifecycle is a no-op that still
    /// signals completion.
    #[instrument(skip(self))]
    pub async fn tear_down(&self) -> Result<(), PluginError> {
        let mut slot = self.inner.engine.try_lock().map_err(|_| {
            PluginError::OperationInFlight {
                message: "Another initialize or teardown is pending".into(),
                context: None,
            }
        })?;

        if let Some(mut engine) = slot.take() {
            if let Err(source) = engine.teardown().await {
                *slot = Some(engine);
                return Err(PluginError::Engine {
                    source,
                    context: Some("ORM engine teardown".into()),
                });
            }
        } else if self.phase() != Phase::Initialized {
            debug!("Teardown without initialization is a no-op");
            return Ok(());
        }

        self.inner.registry.clear();
        self.inner.merger.write().unlock();
        *self.inner.phase.write() = Phase::Configured;
        info!("ORM torn down");
        Ok(())
    }

    /// Serializes the configuration state that may cross the
    /// server/client boundary: the accumulated `common` and `client`
    /// scopes. The server scope and live models never leave.
    #[must_use]
    pub fn dehydrate(&self) -> DehydratedState {
        let merger = self.inner.merger.read();
        DehydratedState {
            common: merger.scope(Scope::Common).clone(),
            client: merger.scope(Scope::Client).clone(),
        }
    }

    /// Reconstructs configuration from a dehydrated snapshot and, when
    /// client adapters were supplied at construction time, initializes
    /// immediately. Without such adapters the plugin stays `Configured`
    /// and the caller performs a later explicit `initialize`.
    #[instrument(skip(self, state))]
    pub async fn rehydrate(&self, state: DehydratedState) -> Result<(), PluginError> {
        self.configure(ConfigPatch {
            common: Some(Value::Object(state.common)),
            server: None,
            client: Some(Value::Object(state.client)),
        })?;

        match self.inner.client_adapters.clone() {
            Some(adapters) => self.initialize(adapters).await,
            None => {
                debug!("No client adapters supplied; leaving initialization to the caller");
                Ok(())
            },
        }
    }
}
