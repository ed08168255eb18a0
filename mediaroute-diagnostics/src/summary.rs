//! Serialisable snapshots of packets and frames
//!
//! Summaries carry metadata and sizes only, never payload bytes, so they are
//! cheap to log or ship to a dashboard.

use mediaroute_core::{AudioChannelLayout, MediaPacket, MediaType};
use mediaroute_media::MediaFrame;
use serde::{Deserialize, Serialize};

/// Snapshot of an encoded packet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketSummary {
    /// Payload kind
    pub media_type: MediaType,
    /// Track the packet belongs to
    pub track_id: u32,
    /// Presentation timestamp
    pub pts: i64,
    /// Whether the packet is a random-access point
    pub keyframe: bool,
    /// Payload size in bytes
    pub size: usize,
}

impl PacketSummary {
    /// Render as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&MediaPacket> for PacketSummary {
    fn from(packet: &MediaPacket) -> Self {
        Self {
            media_type: packet.media_type(),
            track_id: packet.track_id(),
            pts: packet.pts(),
            keyframe: packet.is_keyframe(),
            size: packet.size(),
        }
    }
}

/// Size and stride of one frame plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaneSummary {
    /// Plane index
    pub index: usize,
    /// Logical size in bytes
    pub size: usize,
    /// Row width in bytes, 0 when not set
    pub stride: u32,
}

/// Snapshot of a decoded frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSummary {
    /// Payload kind
    pub media_type: MediaType,
    /// Track the frame belongs to
    pub track_id: u32,
    /// Presentation timestamp
    pub pts: i64,
    /// Raw flag bits
    pub flags: u32,
    /// Consumption cursor
    pub offset: usize,
    /// Planes with an entry
    pub planes: Vec<PlaneSummary>,
    /// Picture width
    pub width: u32,
    /// Picture height
    pub height: u32,
    /// Format code
    pub format: i32,
    /// Bytes per audio sample
    pub bytes_per_sample: u32,
    /// Samples per channel
    pub nb_samples: u32,
    /// Channel count
    pub channels: u32,
    /// Channel layout
    pub channel_layout: AudioChannelLayout,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl FrameSummary {
    /// Total bytes across all planes
    pub fn total_bytes(&self) -> usize {
        self.planes.iter().map(|plane| plane.size).sum()
    }

    /// Render as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&MediaFrame> for FrameSummary {
    fn from(frame: &MediaFrame) -> Self {
        Self {
            media_type: frame.media_type(),
            track_id: frame.track_id(),
            pts: frame.pts(),
            flags: frame.flags().bits(),
            offset: frame.offset(),
            planes: frame
                .planes()
                .map(|(index, buf)| PlaneSummary {
                    index,
                    size: buf.len(),
                    stride: frame.stride(index),
                })
                .collect(),
            width: frame.width(),
            height: frame.height(),
            format: frame.format(),
            bytes_per_sample: frame.bytes_per_sample(),
            nb_samples: frame.nb_samples(),
            channels: frame.channels(),
            channel_layout: frame.channel_layout(),
            sample_rate: frame.sample_rate(),
        }
    }
}
