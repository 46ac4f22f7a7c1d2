//! The ORM build step: registration, engine initialization, association
//! decoration.

use crate::error::{PluginError, PluginErrorExt};
use crate::merger::EffectiveConfig;
use ormlink_domain::derive_associations;
use ormlink_engine::{AdapterInput, LiveModel, OrmEngine, normalize_adapters};
use std::sync::Arc;
use tracing::debug;

/// Drives the engine from an effective configuration to decorated live
/// models.
///
/// Adapter normalization is synchronous and precedes all async work, so an
/// invalid adapter fails before the engine touches anything. An engine
/// initialization failure is surfaced unchanged inside
/// [`PluginError::Engine`]; no retry, no partial result.
pub(crate) async fn build<E: OrmEngine>(
    engine: &mut E,
    config: EffectiveConfig,
    adapters: AdapterInput,
) -> Result<Vec<Arc<LiveModel>>, PluginError> {
    let adapters = normalize_adapters(adapters).context("Adapter normalization")?;

    let definitions = config.models.len();
    for definition in config.models {
        engine.register_model(definition).context("Model registration")?;
    }
    debug!(definitions, adapters = adapters.len(), "Definitions registered; initializing engine");

    let models = engine
        .initialize(adapters, config.connections)
        .await
        .context("ORM engine initialization")?;

    Ok(models
        .into_iter()
        .map(|mut model| {
            model.associations = derive_associations(&model.attributes);
            Arc::new(model)
        })
        .collect())
}
