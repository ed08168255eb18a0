//! # mediaroute - media buffers for streaming pipelines
//!
//! mediaroute is the value layer of a streaming/transcoding pipeline: the
//! encoded packets a demuxer hands to a decoder, and the decoded multi-plane
//! frames that flow through filters into an encoder.
//!
//! ## Key Features
//!
//! - **Shared packets**: encoded payloads are reference counted and
//!   copy-on-write, so fanning a packet out to several stages never copies
//!   the bitstream
//! - **Planar frames**: up to eight independently sized planes per frame,
//!   created lazily, with checked splice/erase and a direct-write path for
//!   decoders
//! - **Typed failures**: out-of-range offsets, plane indices, and allocation
//!   failures are errors, never undefined behaviour
//!
//! ## Quick Start
//!
//! ```rust
//! use mediaroute::{MediaPacket, MediaPacketFlag, MediaRoute, MediaType};
//!
//! let route = MediaRoute::init()?;
//!
//! // Demuxer side: one access unit
//! let packet = MediaPacket::from_slice(MediaType::Video, 1, &[0, 0, 1, 0x65], 0, MediaPacketFlag::Key)?;
//! assert!(packet.is_keyframe());
//!
//! // Decoder side: pre-size the luma plane and write into it directly
//! let mut frame = route.video_frame(1, 16, 16, 0, packet.pts());
//! frame.resize(16 * 16, 0)?;
//! if let Some(luma) = frame.direct_buffer_mut(0) {
//!     luma.fill(0x80);
//! }
//! assert_eq!(frame.data_size(0), 256);
//! # Ok::<(), mediaroute::MediaRouteError>(())
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

// Re-export core types for easy access
pub use mediaroute_core::{
    AudioChannelLayout, BoundsError, ErrorCategory, MediaData, MediaPacket, MediaPacketFlag,
    MediaResult, MediaRouteError, MediaType,
};
pub use mediaroute_media::{BufferLimits, FrameFlags, MediaFrame, Planes, MAX_PLANES, PRIMARY_PLANE};

#[cfg(feature = "diagnostics")]
pub use mediaroute_diagnostics::{DebugLogger, FrameSummary, MediaProfiler, PacketSummary, TrackStats};

// Public API modules
pub mod config;

pub use config::GlobalConfig;

use tracing::info;

/// Main entry point for mediaroute
#[derive(Debug, Clone)]
pub struct MediaRoute {
    config: GlobalConfig,
}

impl MediaRoute {
    /// Initialize with default settings
    pub fn init() -> MediaResult<Self> {
        Self::init_with(GlobalConfig::default())
    }

    /// Initialize with custom global configuration
    pub fn init_with(config: GlobalConfig) -> MediaResult<Self> {
        if config.debug_logging {
            Self::init_logging(&config)?;
        }

        info!(
            "mediaroute initialized (max plane bytes: {:?})",
            config.buffer_limits.max_plane_bytes
        );
        Ok(Self { config })
    }

    #[cfg(feature = "diagnostics")]
    fn init_logging(config: &GlobalConfig) -> MediaResult<()> {
        DebugLogger::with_filter(config.log_filter.clone()).init()
    }

    #[cfg(not(feature = "diagnostics"))]
    fn init_logging(_config: &GlobalConfig) -> MediaResult<()> {
        Err(MediaRouteError::Configuration {
            message: "debug_logging requires the `diagnostics` feature".to_string(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    /// Empty frame carrying the configured buffer limits
    pub fn frame(&self) -> MediaFrame {
        MediaFrame::with_limits(self.config.buffer_limits)
    }

    /// Empty video frame with its geometry filled in
    pub fn video_frame(
        &self,
        track_id: u32,
        width: u32,
        height: u32,
        format: i32,
        pts: i64,
    ) -> MediaFrame {
        let mut frame = self.frame();
        frame.set_media_type(MediaType::Video);
        frame.set_track_id(track_id);
        frame.set_width(width);
        frame.set_height(height);
        frame.set_format(format);
        frame.set_pts(pts);
        frame
    }

    /// Empty audio frame with its sample metadata filled in. The channel
    /// count is taken from `layout`.
    pub fn audio_frame(
        &self,
        track_id: u32,
        sample_rate: u32,
        layout: AudioChannelLayout,
        pts: i64,
    ) -> MediaFrame {
        let mut frame = self.frame();
        frame.set_media_type(MediaType::Audio);
        frame.set_track_id(track_id);
        frame.set_sample_rate(sample_rate);
        frame.set_channel_layout(layout);
        frame.set_channels(layout.channel_count());
        frame.set_pts(pts);
        frame
    }
}
