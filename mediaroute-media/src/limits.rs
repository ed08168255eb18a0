//! Buffer limits configuration
//!
//! Caps on how large a single frame plane may grow. Exceeding a cap fails the
//! operation the same way an allocation failure does.

use mediaroute_core::{MediaResult, MediaRouteError};
use serde::{Deserialize, Serialize};

const MIB: usize = 1024 * 1024;

/// Per-plane allocation limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferLimits {
    /// Maximum bytes held by one plane (None = unlimited)
    pub max_plane_bytes: Option<usize>,
}

impl BufferLimits {
    /// Mobile-oriented limits: enough for 1080p RGBA planes
    pub fn mobile() -> Self {
        Self {
            max_plane_bytes: Some(16 * MIB),
        }
    }

    /// Desktop limits: 4K planes with 16-bit samples
    pub fn desktop() -> Self {
        Self {
            max_plane_bytes: Some(64 * MIB),
        }
    }

    /// Server limits: 8K planes with headroom
    pub fn server() -> Self {
        Self {
            max_plane_bytes: Some(256 * MIB),
        }
    }

    /// No limit beyond what the allocator will hand out
    pub fn unlimited() -> Self {
        Self {
            max_plane_bytes: None,
        }
    }

    /// Check that a plane may hold `required` bytes
    pub fn check_plane(&self, required: usize) -> MediaResult<()> {
        match self.max_plane_bytes {
            Some(max) if required > max => {
                Err(MediaRouteError::AllocationFailed { requested: required })
            }
            _ => Ok(()),
        }
    }
}

impl Default for BufferLimits {
    fn default() -> Self {
        Self::unlimited()
    }
}
