//! Registry of live models, indexed by identity and global-id alias.

use crate::error::PluginError;
use crate::merger::Strictness;
use fxhash::FxHashMap;
use ormlink_engine::LiveModel;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct RegistryIndex {
    /// Primary index, keyed by identity.
    models: FxHashMap<String, Arc<LiveModel>>,
    /// Alias index, keyed by global id. Aliases share the `Arc` with the
    /// primary index: one logical entity, two lookup keys.
    aliases: FxHashMap<String, Arc<LiveModel>>,
}

/// A thread-safe registry of live models.
///
/// The registry is either fully empty or fully populated: `set` validates
/// every entry before inserting any, and `set`/`clear` mutate both indices
/// under a single write lock, so no observer sees a partial state.
/// Only the plugin lifecycle writes to it; its state-machine preconditions
/// serialize all mutation.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    inner: Arc<RwLock<RegistryIndex>>,
    strictness: Strictness,
}

impl ModelRegistry {
    #[must_use]
    pub fn new(strictness: Strictness) -> Self {
        Self { inner: Arc::default(), strictness }
    }

    /// Indexes each model by identity and, if present, by global id,
    /// overwriting existing entries for the same keys. Supports
    /// incremental merging across multiple calls.
    ///
    /// # Errors
    /// In strict mode, [`PluginError::InvalidModel`] if any entry carries
    /// no identity; nothing is inserted in that case. In permissive mode
    /// such an entry is indexed only under the keys it does have.
    pub fn set(
        &self,
        models: impl IntoIterator<Item = Arc<LiveModel>>,
    ) -> Result<usize, PluginError> {
        let models: Vec<Arc<LiveModel>> = models.into_iter().collect();

        if self.strictness == Strictness::Strict
            && let Some(invalid) = models.iter().find(|m| m.identity.trim().is_empty())
        {
            return Err(PluginError::InvalidModel {
                message: format!(
                    "Live model has no identity (globalId: {:?})",
                    invalid.global_id
                )
                .into(),
                context: None,
            });
        }

        let count = models.len();
        let mut index = self.inner.write();
        for model in models {
            if let Some(global_id) = &model.global_id {
                index.aliases.insert(global_id.clone(), Arc::clone(&model));
            }
            if !model.identity.trim().is_empty() {
                index.models.insert(model.identity.clone(), model);
            }
        }
        drop(index);

        debug!(count, "Live models registered");
        Ok(count)
    }

    /// Looks a model up by identity or global id.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<LiveModel>> {
        let index = self.inner.read();
        index.models.get(key).or_else(|| index.aliases.get(key)).cloned()
    }

    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        let index = self.inner.read();
        index.models.contains_key(key) || index.aliases.contains_key(key)
    }

    /// Empties both indices atomically from the consumer's perspective.
    pub fn clear(&self) {
        let mut index = self.inner.write();
        index.models.clear();
        index.aliases.clear();
        drop(index);
        debug!("Registry cleared");
    }

    /// Registered identities, unordered.
    #[must_use]
    pub fn identities(&self) -> Vec<String> {
        self.inner.read().models.keys().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().models.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        let index = self.inner.read();
        index.models.is_empty() && index.aliases.is_empty()
    }
}
