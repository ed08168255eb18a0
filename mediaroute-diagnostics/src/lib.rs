//! # mediaroute diagnostics
//!
//! Debugging and diagnostic tools for the media route.
//! Provides logging setup, per-track flow profiling, and serialisable
//! summaries of packets and frames.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod debug_logger;
pub mod media_profiler;
pub mod summary;

// Re-export main types
pub use debug_logger::DebugLogger;
pub use media_profiler::{MediaProfiler, TrackStats};
pub use summary::{FrameSummary, PacketSummary, PlaneSummary};
