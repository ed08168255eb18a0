//! Encoded media packets
//!
//! A [`MediaPacket`] carries one access unit of compressed bitstream for one
//! track. The payload is a shared [`MediaData`] buffer, so cloning a packet
//! to hand it to several downstream stages never copies the bitstream.

use crate::data::MediaData;
use crate::error::MediaResult;
use crate::media_type::MediaType;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Random-access marker for encoded packets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MediaPacketFlag {
    /// Regular packet
    #[default]
    NoFlag,
    /// Keyframe / random-access point
    Key,
}

/// One encoded access unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPacket {
    media_type: MediaType,
    track_id: u32,
    data: MediaData,
    pts: i64,
    flags: MediaPacketFlag,
}

impl MediaPacket {
    /// Create a packet holding a copy of `data`
    pub fn from_slice(
        media_type: MediaType,
        track_id: u32,
        data: &[u8],
        pts: i64,
        flags: MediaPacketFlag,
    ) -> MediaResult<Self> {
        let mut payload = MediaData::new();
        payload.append(data)?;

        trace!(
            "Created {} packet for track {}: {} bytes, pts {}",
            media_type,
            track_id,
            payload.len(),
            pts
        );

        Ok(Self {
            media_type,
            track_id,
            data: payload,
            pts,
            flags,
        })
    }

    /// Create a packet from an existing shared buffer.
    ///
    /// The new payload starts empty and appends `data`, which adopts its
    /// storage rather than copying it.
    pub fn from_data(
        media_type: MediaType,
        track_id: u32,
        data: &MediaData,
        pts: i64,
        flags: MediaPacketFlag,
    ) -> MediaResult<Self> {
        let mut payload = MediaData::new();
        payload.append_data(data)?;

        trace!(
            "Created {} packet for track {} from shared buffer: {} bytes, pts {}",
            media_type,
            track_id,
            payload.len(),
            pts
        );

        Ok(Self {
            media_type,
            track_id,
            data: payload,
            pts,
            flags,
        })
    }

    /// Payload kind
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// Read-only view of the payload
    pub fn data(&self) -> &MediaData {
        &self.data
    }

    /// Mutable handle to the payload.
    ///
    /// Writes copy the storage first if other packets still share it.
    pub fn data_mut(&mut self) -> &mut MediaData {
        &mut self.data
    }

    /// Presentation timestamp
    pub fn pts(&self) -> i64 {
        self.pts
    }

    /// Logical stream this packet belongs to
    pub fn track_id(&self) -> u32 {
        self.track_id
    }

    /// Remap the packet to another track
    pub fn set_track_id(&mut self, track_id: u32) {
        if track_id != self.track_id {
            trace!("Remapping packet track {} -> {}", self.track_id, track_id);
        }
        self.track_id = track_id;
    }

    /// Packet flags
    pub fn flags(&self) -> MediaPacketFlag {
        self.flags
    }

    /// Whether this packet is a random-access point
    pub fn is_keyframe(&self) -> bool {
        self.flags == MediaPacketFlag::Key
    }

    /// Payload size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_from_slice() {
        let packet = MediaPacket::from_slice(
            MediaType::Video,
            5,
            &[0x01, 0x02, 0x03],
            1000,
            MediaPacketFlag::Key,
        )
        .unwrap();

        assert_eq!(packet.media_type(), MediaType::Video);
        assert_eq!(packet.track_id(), 5);
        assert_eq!(packet.pts(), 1000);
        assert_eq!(packet.flags(), MediaPacketFlag::Key);
        assert!(packet.is_keyframe());
        assert_eq!(packet.data().as_slice(), &[0x01, 0x02, 0x03]);
        assert_eq!(packet.size(), 3);
    }

    #[test]
    fn test_packet_from_shared_data() {
        let shared = MediaData::from_slice(&[0x00, 0x00, 0x00, 0x01, 0x65]).unwrap();
        let packet =
            MediaPacket::from_data(MediaType::Video, 1, &shared, 0, MediaPacketFlag::NoFlag)
                .unwrap();

        assert!(packet.data().is_shared_with(&shared));
        assert!(!packet.is_keyframe());
    }

    #[test]
    fn test_set_track_id_only_changes_track() {
        let mut packet =
            MediaPacket::from_slice(MediaType::Audio, 2, &[7, 7], -40, MediaPacketFlag::NoFlag)
                .unwrap();

        packet.set_track_id(9);

        assert_eq!(packet.track_id(), 9);
        assert_eq!(packet.media_type(), MediaType::Audio);
        assert_eq!(packet.pts(), -40);
        assert_eq!(packet.flags(), MediaPacketFlag::NoFlag);
        assert_eq!(packet.data().as_slice(), &[7, 7]);
    }

    #[test]
    fn test_empty_packet() {
        let packet =
            MediaPacket::from_slice(MediaType::Data, 0, &[], 0, MediaPacketFlag::NoFlag).unwrap();
        assert_eq!(packet.size(), 0);
        assert!(packet.data().is_empty());
    }
}
