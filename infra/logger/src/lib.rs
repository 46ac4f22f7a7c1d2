//! # Logger
//!
//! A centralized logging utility for the project.
//! It provides a unified way to configure console logging with level and
//! environment-based filtering for binaries and tests.
//!
//! * `RUST_LOG` always overrides the programmatic configuration.
//! * Use [`LoggerBuilder::env_filter`] to set module-directed filters
//!   (e.g., `"ormlink=debug,hyper=info"`), in addition to `RUST_LOG`.
//!
//! ## Example
//!
//! ```rust
//! # use ormlink_logger::{Logger, LevelFilter};
//!
//! Logger::builder()
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Entry point for configuring the global tracing subscriber.
#[derive(Debug)]
pub struct Logger;

impl Logger {
    #[must_use = "The builder must be initialized with .init() to install the subscriber"]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }
}

/// A builder for configuring and initializing the global tracing subscriber.
#[derive(Debug)]
pub struct LoggerBuilder {
    level: LevelFilter,
    env_filter: Option<String>,
    json: bool,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self { level: LevelFilter::INFO, env_filter: None, json: false }
    }
}

impl LoggerBuilder {
    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Adds an explicit env filter (e.g., `ormlink=debug,hyper=info`).
    ///
    /// Environment variables still override via `RUST_LOG`; this is a
    /// programmatic default.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables JSON logging.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self) -> Self {
        self.json = true;
        self
    }

    /// Installs the global subscriber.
    ///
    /// # Errors
    /// Returns [`LoggerError::Filter`] for malformed filter directives and
    /// [`LoggerError::Init`] if a global subscriber is already installed.
    pub fn init(self) -> Result<(), LoggerError> {
        let mut filter = EnvFilter::builder()
            .with_default_directive(self.level.into())
            .from_env_lossy();

        if let Some(directives) = &self.env_filter {
            for directive in directives.split(',').filter(|d| !d.trim().is_empty()) {
                let parsed = directive.trim().parse().map_err(|_| LoggerError::Filter {
                    message: directive.trim().to_owned().into(),
                    context: None,
                })?;
                filter = filter.add_directive(parsed);
            }
        }

        let console = if self.json {
            layer().json().with_target(true).boxed()
        } else {
            layer().with_target(true).boxed()
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(console)
            .try_init()
            .map_err(|e| LoggerError::Init { message: e.to_string().into(), context: None })
    }
}
