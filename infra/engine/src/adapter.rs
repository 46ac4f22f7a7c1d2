//! Adapter contract and input normalization.

use crate::error::EngineError;
use fxhash::FxHashMap;
use std::fmt::Debug;
use std::sync::Arc;
use tracing::warn;

/// An opaque storage driver bound to connections by name.
///
/// Adapters are supplied at initialization time only and are never part of
/// serialized configuration state. The identity string is the adapter's
/// sole contract with this layer; everything else belongs to the engine.
pub trait Adapter: Debug + Send + Sync {
    /// The unique identity naming this adapter in connection configs.
    fn identity(&self) -> &str;
}

/// A shared handle to an adapter implementation.
pub type AdapterRef = Arc<dyn Adapter>;

/// Adapters keyed by their own identity.
pub type AdapterMap = FxHashMap<String, AdapterRef>;

/// The two shapes adapter collections arrive in.
#[derive(Debug, Clone)]
pub enum AdapterInput {
    /// An ordered list; each entry is keyed by its own identity.
    List(Vec<AdapterRef>),
    /// An identity-keyed map; entries are re-keyed by their own identity,
    /// so a mis-keyed map cannot smuggle an adapter under a foreign name.
    Map(AdapterMap),
}

impl From<Vec<AdapterRef>> for AdapterInput {
    fn from(list: Vec<AdapterRef>) -> Self {
        Self::List(list)
    }
}

impl From<AdapterMap> for AdapterInput {
    fn from(map: AdapterMap) -> Self {
        Self::Map(map)
    }
}

/// Normalizes either adapter input shape into the canonical
/// identity-keyed map.
///
/// # Errors
/// Returns [`EngineError::InvalidAdapter`] if any adapter exposes an empty
/// identity. Duplicate identities keep the later entry.
pub fn normalize_adapters(input: AdapterInput) -> Result<AdapterMap, EngineError> {
    let list: Vec<AdapterRef> = match input {
        AdapterInput::List(list) => list,
        AdapterInput::Map(map) => map.into_values().collect(),
    };

    let mut adapters = AdapterMap::default();
    for adapter in list {
        let identity = adapter.identity().trim().to_owned();
        if identity.is_empty() {
            return Err(EngineError::InvalidAdapter {
                message: format!("Adapter exposes no identity: {adapter:?}").into(),
                context: None,
            });
        }
        if adapters.insert(identity.clone(), adapter).is_some() {
            warn!(identity = %identity, "Duplicate adapter identity; keeping the later entry");
        }
    }

    Ok(adapters)
}
