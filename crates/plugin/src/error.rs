use ormlink_engine::EngineError;
use std::borrow::Cow;

/// A specialized [`PluginError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Validation errors (malformed patches, misuse of an unconfigured plugin).
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Configuration mutated after the ORM was initialized.
    #[error("Configuration is locked{}: {message}", format_context(.context))]
    ConfigurationLocked { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A lifecycle operation that requires an uninitialized plugin was
    /// called while live models are registered.
    #[error("Already initialized{}: {message}", format_context(.context))]
    AlreadyInitialized { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A second initialize/teardown was attempted while one is pending.
    #[error("Operation in flight{}: {message}", format_context(.context))]
    OperationInFlight { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A model without an identity was supplied in strict mode.
    #[error("Invalid model{}: {message}", format_context(.context))]
    InvalidModel { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Lookup of an identity no live model is registered under.
    #[error("Unknown identity{}: {message}", format_context(.context))]
    UnknownIdentity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Configuration state that does not deserialize into its typed form.
    #[error("Serialization error{}: {source}", format_context(.context))]
    Serialization {
        #[source]
        source: serde_json::Error,
        context: Option<Cow<'static, str>>,
    },

    /// A wrapper for failures of the external ORM engine, cause preserved.
    #[error("ORM engine error{}: {source}", format_context(.context))]
    Engine {
        #[source]
        source: EngineError,
        context: Option<Cow<'static, str>>,
    },
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

impl From<serde_json::Error> for PluginError {
    #[inline]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization { source, context: None }
    }
}

impl From<EngineError> for PluginError {
    #[inline]
    fn from(source: EngineError) -> Self {
        Self::Engine { source, context: None }
    }
}

/// Adds `.context(...)` to results in this crate's error domain.
pub trait PluginErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, PluginError>;
}

impl<T> PluginErrorExt<T> for Result<T, PluginError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                PluginError::Validation { context: c, .. }
                | PluginError::ConfigurationLocked { context: c, .. }
                | PluginError::AlreadyInitialized { context: c, .. }
                | PluginError::OperationInFlight { context: c, .. }
                | PluginError::InvalidModel { context: c, .. }
                | PluginError::UnknownIdentity { context: c, .. }
                | PluginError::Serialization { context: c, .. }
                | PluginError::Engine { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl<T> PluginErrorExt<T> for Result<T, serde_json::Error> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, PluginError> {
        self.map_err(|source| PluginError::Serialization { source, context: Some(context.into()) })
    }
}

impl<T> PluginErrorExt<T> for Result<T, EngineError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, PluginError> {
        self.map_err(|source| PluginError::Engine { source, context: Some(context.into()) })
    }
}
