//! Model and connection definitions as authored in configuration scopes.

use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A lifecycle hook body, invoked by the ORM engine with the record payload
/// it is about to process.
pub type HookFn = dyn Fn(&mut Value) + Send + Sync;

/// Named lifecycle hooks attached to a model definition.
///
/// Hooks are plain functions and therefore never serialize; a dehydrated
/// configuration carries none, which is why they are registered
/// programmatically rather than inside scope patches.
#[derive(Clone, Default)]
pub struct ModelHooks {
    hooks: FxHashMap<String, Arc<HookFn>>,
}

impl ModelHooks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, hook: Arc<HookFn>) {
        self.hooks.insert(name.into(), hook);
    }

    #[must_use]
    pub fn with(
        mut self,
        name: impl Into<String>,
        hook: impl Fn(&mut Value) + Send + Sync + 'static,
    ) -> Self {
        self.insert(name, Arc::new(hook));
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<HookFn>> {
        self.hooks.get(name)
    }

    /// Overlays `other` onto `self`; `other` wins on name conflicts.
    pub fn merge(&mut self, other: &Self) {
        for (name, hook) in &other.hooks {
            self.hooks.insert(name.clone(), Arc::clone(hook));
        }
    }

    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.hooks.keys().map(String::as_str).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for ModelHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelHooks").field(&self.names()).finish()
    }
}

/// A model definition as authored in a configuration scope.
///
/// `identity` is the unique lowercase key; `global_id` an optional
/// display-cased alias for the same model. Attribute declarations stay as
/// raw JSON (declaration-ordered) until the engine resolves them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModelDefinition {
    pub identity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_id: Option<String>,
    pub connection: String,
    pub attributes: Map<String, Value>,
    #[serde(skip)]
    pub hooks: ModelHooks,
}

impl ModelDefinition {
    #[must_use]
    pub fn new(identity: impl Into<String>, connection: impl Into<String>) -> Self {
        Self { identity: identity.into(), connection: connection.into(), ..Self::default() }
    }

    #[must_use]
    pub fn global_id(mut self, global_id: impl Into<String>) -> Self {
        self.global_id = Some(global_id.into());
        self
    }

    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, spec: Value) -> Self {
        self.attributes.insert(name.into(), spec);
        self
    }

    #[must_use]
    pub fn hook(
        mut self,
        name: impl Into<String>,
        hook: impl Fn(&mut Value) + Send + Sync + 'static,
    ) -> Self {
        self.hooks = self.hooks.with(name, hook);
        self
    }
}

/// A named connection, binding an adapter identity to driver-specific
/// settings. Referenced by [`ModelDefinition::connection`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionConfig {
    pub adapter: String,
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}
