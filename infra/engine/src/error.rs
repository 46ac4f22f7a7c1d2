use std::borrow::Cow;

/// A specialized [`EngineError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An adapter that exposes no usable identity was supplied.
    #[error("Invalid adapter{}: {message}", format_context(.context))]
    InvalidAdapter { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Engine initialization failed (adapter binding, schema reconciliation).
    #[error("Engine initialization failed{}: {message}", format_context(.context))]
    Initialization { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Engine teardown failed; adapters and connections may still be live.
    #[error("Engine teardown failed{}: {message}", format_context(.context))]
    Teardown { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

/// Adds `.context(...)` to results carrying an [`EngineError`].
pub trait EngineErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, EngineError>;
}

impl<T> EngineErrorExt<T> for Result<T, EngineError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                EngineError::InvalidAdapter { context: c, .. }
                | EngineError::Initialization { context: c, .. }
                | EngineError::Teardown { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}
