//! Integration surface for the hosting application's contexts.
//!
//! The host hands over mutable context objects; binding attaches
//! read-through accessors backed by the live registry. Nothing here
//! mutates the registry.

use crate::error::PluginError;
use crate::lifecycle::OrmPlugin;
use crate::registry::ModelRegistry;
use ormlink_domain::{AssociationDescriptor, AttributeKind, attribute_kind};
use ormlink_engine::{LiveModel, OrmEngine};
use std::sync::Arc;

/// Request-scoped context of the host's action pipeline.
#[derive(Debug, Default)]
pub struct ActionContext {
    /// Read-through access to the live models, populated by
    /// [`OrmPlugin::bind_action_context`].
    pub models: Option<ModelRegistry>,
}

/// Context of the host's store layer.
#[derive(Debug, Default)]
pub struct StoreContext {
    /// Lookup surface, populated by [`OrmPlugin::bind_store_context`].
    pub orm: Option<StoreBindings>,
}

/// The lookup surface handed to a store context.
#[derive(Debug, Clone)]
pub struct StoreBindings {
    registry: ModelRegistry,
}

impl StoreBindings {
    pub(crate) fn new(registry: ModelRegistry) -> Self {
        Self { registry }
    }

    /// The live model (the constructor/factory object) for an identity.
    ///
    /// # Errors
    /// [`PluginError::UnknownIdentity`] if nothing is registered under the
    /// given key.
    pub fn model(&self, identity: &str) -> Result<Arc<LiveModel>, PluginError> {
        self.registry.get(identity).ok_or_else(|| PluginError::UnknownIdentity {
            message: identity.to_owned().into(),
            context: None,
        })
    }

    /// The semantic kind of a named attribute on a model, with
    /// relationship attributes resolved to their relationship nature
    /// rather than their raw declaration. `None` for unknown attributes.
    pub fn attribute_kind(
        &self,
        identity: &str,
        attribute: &str,
    ) -> Result<Option<AttributeKind>, PluginError> {
        Ok(attribute_kind(&self.model(identity)?.attributes, attribute))
    }

    /// The derived association list for an identity.
    pub fn associations(&self, identity: &str) -> Result<Vec<AssociationDescriptor>, PluginError> {
        Ok(self.model(identity)?.associations.clone())
    }
}

impl<E: OrmEngine> OrmPlugin<E> {
    /// Attaches the live registry to an action context.
    pub fn bind_action_context(&self, context: &mut ActionContext) {
        context.models = Some(self.registry());
    }

    /// Attaches the model lookup surface to a store context.
    pub fn bind_store_context(&self, context: &mut StoreContext) {
        context.orm = Some(StoreBindings::new(self.registry()));
    }
}
