//! # mediaroute media
//!
//! Decoded frame storage for the media route: per-plane byte buffers, the
//! geometry and sample metadata that describe them, and the limits applied
//! when planes grow.

#![warn(clippy::all)]

pub mod frame;
pub mod limits;
pub mod planes;

// Re-export main types
pub use frame::{FrameFlags, MediaFrame};
pub use limits::BufferLimits;
pub use planes::{Planes, MAX_PLANES, PRIMARY_PLANE};
