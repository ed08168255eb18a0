//! Media type tags shared by packets and frames

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of payload carried by a packet or frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MediaType {
    /// Video track
    Video,
    /// Audio track
    Audio,
    /// Generic data track
    Data,
    /// Subtitle track
    Subtitle,
    /// Not yet known
    #[default]
    Unknown,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaType::Video => "video",
            MediaType::Audio => "audio",
            MediaType::Data => "data",
            MediaType::Subtitle => "subtitle",
            MediaType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Standard audio channel layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AudioChannelLayout {
    /// Mono (1 channel)
    #[default]
    Mono,
    /// Stereo (FL, FR)
    Stereo,
    /// 2.1 (FL, FR, LFE)
    Surround21,
    /// Quad (FL, FR, BL, BR)
    Quad,
    /// 5.0 (FL, FR, FC, BL, BR)
    Surround50,
    /// 5.1 (FL, FR, FC, LFE, BL, BR)
    Surround51,
    /// 7.1 (FL, FR, FC, LFE, BL, BR, SL, SR)
    Surround71,
}

impl AudioChannelLayout {
    /// Nominal number of channels in this layout
    pub fn channel_count(&self) -> u32 {
        match self {
            AudioChannelLayout::Mono => 1,
            AudioChannelLayout::Stereo => 2,
            AudioChannelLayout::Surround21 => 3,
            AudioChannelLayout::Quad => 4,
            AudioChannelLayout::Surround50 => 5,
            AudioChannelLayout::Surround51 => 6,
            AudioChannelLayout::Surround71 => 8,
        }
    }

    /// Standard layout for a channel count, if there is one
    pub fn from_channel_count(channels: u32) -> Option<Self> {
        match channels {
            1 => Some(AudioChannelLayout::Mono),
            2 => Some(AudioChannelLayout::Stereo),
            3 => Some(AudioChannelLayout::Surround21),
            4 => Some(AudioChannelLayout::Quad),
            5 => Some(AudioChannelLayout::Surround50),
            6 => Some(AudioChannelLayout::Surround51),
            8 => Some(AudioChannelLayout::Surround71),
            _ => None,
        }
    }
}
