//! Configuration types and defaults

use mediaroute_core::{MediaResult, MediaRouteError};
use mediaroute_media::BufferLimits;
use serde::{Deserialize, Serialize};

/// Global mediaroute configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Install a log subscriber on init
    pub debug_logging: bool,
    /// Fallback log filter when `RUST_LOG` is not set
    pub log_filter: String,
    /// Limits applied to frames created through [`crate::MediaRoute`]
    pub buffer_limits: BufferLimits,
}

impl GlobalConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Example
    /// ```rust
    /// use mediaroute::GlobalConfig;
    ///
    /// let config = GlobalConfig::from_json(r#"{"buffer_limits": {"max_plane_bytes": 1048576}}"#)?;
    /// assert_eq!(config.buffer_limits.max_plane_bytes, Some(1048576));
    /// assert!(!config.debug_logging);
    /// # Ok::<(), mediaroute::MediaRouteError>(())
    /// ```
    pub fn from_json(json: &str) -> MediaResult<Self> {
        serde_json::from_str(json).map_err(|e| MediaRouteError::Configuration {
            message: format!("Failed to parse configuration: {}", e),
        })
    }
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_filter: "info".to_string(),
            buffer_limits: BufferLimits::default(),
        }
    }
}
