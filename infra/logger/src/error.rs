use std::borrow::Cow;

/// A specialized [`LoggerError`] enum of this crate.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A malformed filter directive was supplied.
    #[error("Invalid filter directive{}: {message}", format_context(.context))]
    Filter { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A global subscriber is already installed.
    #[error("Logger initialization failed{}: {message}", format_context(.context))]
    Init { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}

/// Adds `.context(...)` to results carrying a [`LoggerError`].
pub trait LoggerErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, LoggerError>;
}

impl<T> LoggerErrorExt<T> for Result<T, LoggerError> {
    #[inline]
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                LoggerError::Filter { context: c, .. } | LoggerError::Init { context: c, .. } => {
                    *c = Some(context.into());
                },
            }
            e
        })
    }
}
