//! Error types for mediaroute
//!
//! Failures in this layer are binary: an operation either succeeds or leaves
//! the buffer it was called on untouched and returns one of these errors.

use thiserror::Error;

/// Main error type for media buffer operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MediaRouteError {
    /// Allocation failed or a configured buffer limit would be exceeded
    #[error("Memory allocation failed: {requested} bytes")]
    AllocationFailed {
        /// Total size the buffer would have needed
        requested: usize,
    },

    /// Byte range outside the current contents of a plane
    #[error(transparent)]
    OutOfBounds(#[from] BoundsError),

    /// Plane index beyond the fixed plane table
    #[error("Plane index {plane} out of range (max {max})")]
    PlaneOutOfRange {
        /// Requested plane index
        plane: usize,
        /// Number of plane slots available
        max: usize,
    },

    /// Consumption cursor advance would overflow
    #[error("Offset overflow: {offset} + {delta}")]
    OffsetOverflow {
        /// Cursor before the advance
        offset: usize,
        /// Requested advance
        delta: usize,
    },

    /// Initialization error
    #[error("Initialization failed: {reason}")]
    Initialization {
        /// Reason for initialization failure
        reason: String,
    },

    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Error message
        message: String,
    },
}

/// Byte range that does not fit inside a plane.
///
/// `offset..offset + length` was requested against a plane holding `size`
/// bytes.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Byte range {offset}+{length} out of bounds for plane {plane} ({size} bytes)")]
pub struct BoundsError {
    /// Plane the range was applied to
    pub plane: usize,
    /// Start of the requested range
    pub offset: usize,
    /// Length of the requested range
    pub length: usize,
    /// Current logical size of the plane
    pub size: usize,
}

/// Result type alias for media buffer operations
pub type MediaResult<T> = Result<T, MediaRouteError>;

impl MediaRouteError {
    /// Allocation failure for a buffer that needed `requested` bytes
    pub fn allocation(requested: usize) -> Self {
        MediaRouteError::AllocationFailed { requested }
    }

    /// Check if error is recoverable
    ///
    /// Bounds and range errors are caller mistakes that can be corrected and
    /// retried; allocation failures and setup errors are not.
    pub fn is_recoverable(&self) -> bool {
        match self {
            MediaRouteError::OutOfBounds(_) => true,
            MediaRouteError::PlaneOutOfRange { .. } => true,
            MediaRouteError::OffsetOverflow { .. } => false,
            MediaRouteError::AllocationFailed { .. } => false,
            MediaRouteError::Initialization { .. } => false,
            MediaRouteError::Configuration { .. } => false,
        }
    }

    /// Get error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            MediaRouteError::AllocationFailed { .. } => ErrorCategory::Memory,
            MediaRouteError::OutOfBounds(_) => ErrorCategory::Bounds,
            MediaRouteError::PlaneOutOfRange { .. } => ErrorCategory::Bounds,
            MediaRouteError::OffsetOverflow { .. } => ErrorCategory::Bounds,
            MediaRouteError::Initialization { .. } => ErrorCategory::System,
            MediaRouteError::Configuration { .. } => ErrorCategory::Configuration,
        }
    }
}

/// Error categories for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Allocation and buffer limit errors
    Memory,
    /// Plane index, byte range, and cursor errors
    Bounds,
    /// Configuration and parameter errors
    Configuration,
    /// System-level errors (logging setup, etc.)
    System,
}
