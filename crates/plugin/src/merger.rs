//! Layered configuration scopes and effective-config computation.

use crate::error::{PluginError, PluginErrorExt};
use fxhash::FxHashMap;
use ormlink_domain::{
    ConnectionConfig, Environment, HookFn, ModelDefinition, ModelHooks, Scope, deep_merge,
};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{trace, warn};

/// Validation strictness, chosen explicitly at construction time.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub enum Strictness {
    /// Reject definitions and live models that carry no identity.
    #[default]
    Strict,
    /// Skip identity validation; unusable entries are dropped or left
    /// unreachable instead of reported.
    Permissive,
}

/// The effective configuration for one environment: `common` overridden
/// leaf-by-leaf by the environment's scope, with `modelDefaults` already
/// folded under every definition.
#[derive(Debug, Clone, Default)]
pub struct EffectiveConfig {
    pub models: Vec<ModelDefinition>,
    pub connections: FxHashMap<String, ConnectionConfig>,
}

/// Accumulates the three configuration scopes and computes effective views.
///
/// Scopes are held as raw JSON objects so merge semantics stay uniform:
/// objects merge key-by-key, scalars and arrays replace wholesale. Model
/// lists are normalized to identity-keyed maps on ingest, which is what
/// lets a later scope override a single field of a model declared earlier.
#[derive(Debug)]
pub struct ConfigMerger {
    strictness: Strictness,
    common: Map<String, Value>,
    server: Map<String, Value>,
    client: Map<String, Value>,
    hooks: FxHashMap<String, ModelHooks>,
    locked: bool,
}

impl ConfigMerger {
    #[must_use]
    pub fn new(strictness: Strictness) -> Self {
        Self {
            strictness,
            common: Map::new(),
            server: Map::new(),
            client: Map::new(),
            hooks: FxHashMap::default(),
            locked: false,
        }
    }

    /// Whether configuration mutation is currently rejected.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Freezes configuration; called once the ORM holds live state.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Reopens configuration after the ORM released its live state.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// The accumulated raw state of one scope.
    #[must_use]
    pub fn scope(&self, scope: Scope) -> &Map<String, Value> {
        match scope {
            Scope::Common => &self.common,
            Scope::Server => &self.server,
            Scope::Client => &self.client,
        }
    }

    /// Deep-merges `patch` into the named scope.
    ///
    /// # Errors
    /// [`PluginError::ConfigurationLocked`] after initialization,
    /// [`PluginError::Validation`] for non-object patches, and in strict
    /// mode [`PluginError::InvalidModel`] for list-form models without an
    /// identity.
    pub fn merge_scope(&mut self, scope: Scope, patch: Value) -> Result<(), PluginError> {
        if self.locked {
            return Err(PluginError::ConfigurationLocked {
                message: format!("Cannot merge into '{scope}' after initialization").into(),
                context: None,
            });
        }

        let Value::Object(mut patch) = patch else {
            return Err(PluginError::Validation {
                message: format!("Scope patch for '{scope}' must be an object").into(),
                context: None,
            });
        };

        if let Some(models) = patch.remove("models") {
            patch.insert("models".to_owned(), normalize_models(models, self.strictness)?);
        }

        trace!(%scope, keys = patch.len(), "Merging scope patch");
        let slot = match scope {
            Scope::Common => &mut self.common,
            Scope::Server => &mut self.server,
            Scope::Client => &mut self.client,
        };
        let mut base = Value::Object(std::mem::take(slot));
        deep_merge(&mut base, Value::Object(patch));
        if let Value::Object(merged) = base {
            *slot = merged;
        }
        Ok(())
    }

    /// Registers a named lifecycle hook for a model identity.
    ///
    /// Hooks cannot travel inside scope patches (they are functions, the
    /// scopes are JSON), so they are accumulated here and attached to
    /// definitions when the effective configuration is computed.
    pub fn model_hook(
        &mut self,
        identity: impl Into<String>,
        name: impl Into<String>,
        hook: Arc<HookFn>,
    ) -> Result<(), PluginError> {
        if self.locked {
            return Err(PluginError::ConfigurationLocked {
                message: "Cannot register hooks after initialization".into(),
                context: None,
            });
        }
        self.hooks.entry(identity.into()).or_default().insert(name, hook);
        Ok(())
    }

    /// Computes the effective configuration for an environment: `common`
    /// deep-merged with the environment's scope, `modelDefaults` folded
    /// under every model (definition wins), identities filled from map
    /// keys, hooks attached.
    pub fn effective(&self, environment: Environment) -> Result<EffectiveConfig, PluginError> {
        let mut merged = Value::Object(self.common.clone());
        deep_merge(&mut merged, Value::Object(self.scope(environment.scope()).clone()));
        let Value::Object(root) = merged else {
            unreachable!("merging two objects yields an object");
        };

        let defaults = root.get("modelDefaults").cloned();
        let models_raw = root.get("models").cloned().unwrap_or_else(|| json!({}));
        let Value::Object(entries) = models_raw else {
            return Err(PluginError::Validation {
                message: "Merged 'models' is not an identity-keyed map".into(),
                context: None,
            });
        };

        let mut models = Vec::with_capacity(entries.len());
        for (key, entry) in entries {
            let mut resolved = defaults.clone().unwrap_or_else(|| json!({}));
            deep_merge(&mut resolved, entry);
            if let Some(resolved) = resolved.as_object_mut()
                && resolved.get("identity").and_then(Value::as_str).unwrap_or_default().is_empty()
            {
                resolved.insert("identity".to_owned(), Value::String(key.clone()));
            }

            let mut definition: ModelDefinition =
                serde_json::from_value(resolved).context(format!("Model '{key}'"))?;
            if let Some(hooks) = self.hooks.get(&definition.identity) {
                definition.hooks.merge(hooks);
            }
            models.push(definition);
        }

        let connections = match root.get("connections") {
            None => FxHashMap::default(),
            Some(value) => {
                serde_json::from_value(value.clone()).context("Connection configs")?
            },
        };

        Ok(EffectiveConfig { models, connections })
    }
}

/// Normalizes a `models` declaration (list or identity-keyed map) into the
/// identity-keyed map form used for merging. Duplicate identities are
/// last-write-wins, by documented policy.
fn normalize_models(models: Value, strictness: Strictness) -> Result<Value, PluginError> {
    match models {
        Value::Object(map) => Ok(Value::Object(map)),
        Value::Array(list) => {
            let mut map = Map::new();
            for entry in list {
                let identity =
                    entry.get("identity").and_then(Value::as_str).unwrap_or_default().to_owned();
                if identity.is_empty() {
                    if strictness == Strictness::Strict {
                        return Err(PluginError::InvalidModel {
                            message: "Model declaration has no identity".into(),
                            context: None,
                        });
                    }
                    warn!("Skipping model declaration without an identity");
                    continue;
                }
                map.insert(identity, entry);
            }
            Ok(Value::Object(map))
        },
        _ => Err(PluginError::Validation {
            message: "'models' must be a list or an identity-keyed map".into(),
            context: None,
        }),
    }
}
