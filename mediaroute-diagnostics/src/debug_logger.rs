//! Structured debug logging setup

use mediaroute_core::{MediaResult, MediaRouteError};
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor an explicit filter is given
pub const DEFAULT_FILTER: &str = "info";

/// Installs the process-wide `tracing` subscriber
#[derive(Debug, Clone)]
pub struct DebugLogger {
    filter: String,
}

impl DebugLogger {
    /// Create new debug logger with the default filter
    pub fn new() -> Self {
        Self::with_filter(DEFAULT_FILTER)
    }

    /// Create a logger with an explicit filter directive, e.g.
    /// `"mediaroute_media=trace,info"`
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
        }
    }

    /// Filter directive this logger falls back to
    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Parse the configured filter directive
    pub fn parse_filter(&self) -> MediaResult<EnvFilter> {
        EnvFilter::try_new(&self.filter).map_err(|e| MediaRouteError::Configuration {
            message: format!("Invalid log filter '{}': {}", self.filter, e),
        })
    }

    /// Install a fmt subscriber. `RUST_LOG` takes precedence over the
    /// configured filter. Fails if a global subscriber is already set.
    pub fn init(&self) -> MediaResult<()> {
        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => self.parse_filter()?,
        };

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| MediaRouteError::Initialization {
                reason: format!("Failed to install log subscriber: {}", e),
            })?;

        tracing::debug!("Logging initialized with fallback filter '{}'", self.filter);
        Ok(())
    }

    /// Initialize logging with the default filter
    pub fn init_logging() -> MediaResult<()> {
        Self::new().init()
    }
}

impl Default for DebugLogger {
    fn default() -> Self {
        Self::new()
    }
}
