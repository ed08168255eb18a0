//! Per-track media flow profiling
//!
//! Pipeline stages call [`MediaProfiler::record_packet`] and
//! [`MediaProfiler::record_frame`] as units pass through; the profiler keeps
//! running counters per track and can be shared across worker threads.

use mediaroute_core::{MediaPacket, MediaType};
use mediaroute_media::MediaFrame;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Counters for one track
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackStats {
    /// Media type of the most recent unit seen
    pub media_type: MediaType,
    /// Encoded packets seen
    pub packets: u64,
    /// Encoded packets flagged as keyframes
    pub keyframes: u64,
    /// Total encoded payload bytes
    pub packet_bytes: u64,
    /// Decoded frames seen
    pub frames: u64,
    /// Total decoded bytes across all planes
    pub frame_bytes: u64,
    /// Lowest timestamp seen
    pub min_pts: Option<i64>,
    /// Highest timestamp seen
    pub max_pts: Option<i64>,
}

impl TrackStats {
    fn observe_pts(&mut self, pts: i64) {
        self.min_pts = Some(self.min_pts.map_or(pts, |min| min.min(pts)));
        self.max_pts = Some(self.max_pts.map_or(pts, |max| max.max(pts)));
    }

    /// Average encoded packet size in bytes
    pub fn average_packet_size(&self) -> Option<u64> {
        (self.packets > 0).then(|| self.packet_bytes / self.packets)
    }
}

/// Thread-safe per-track counters
#[derive(Debug, Default)]
pub struct MediaProfiler {
    tracks: RwLock<HashMap<u32, TrackStats>>,
}

impl MediaProfiler {
    /// Create an empty profiler
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an encoded packet
    pub fn record_packet(&self, packet: &MediaPacket) {
        let mut tracks = self.tracks.write();
        let stats = Self::track_entry(&mut tracks, packet.track_id(), packet.media_type());

        stats.media_type = packet.media_type();
        stats.packets += 1;
        if packet.is_keyframe() {
            stats.keyframes += 1;
        }
        stats.packet_bytes += packet.size() as u64;
        stats.observe_pts(packet.pts());
    }

    /// Count a decoded frame
    pub fn record_frame(&self, frame: &MediaFrame) {
        let bytes: usize = frame.planes().map(|(_, buf)| buf.len()).sum();

        let mut tracks = self.tracks.write();
        let stats = Self::track_entry(&mut tracks, frame.track_id(), frame.media_type());

        stats.media_type = frame.media_type();
        stats.frames += 1;
        stats.frame_bytes += bytes as u64;
        stats.observe_pts(frame.pts());
    }

    /// Counters for one track
    pub fn track_stats(&self, track_id: u32) -> Option<TrackStats> {
        self.tracks.read().get(&track_id).cloned()
    }

    /// Counters for every track, ordered by track id
    pub fn snapshot(&self) -> BTreeMap<u32, TrackStats> {
        self.tracks
            .read()
            .iter()
            .map(|(track_id, stats)| (*track_id, stats.clone()))
            .collect()
    }

    /// Render the snapshot as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot())
    }

    /// Drop all counters
    pub fn reset(&self) {
        self.tracks.write().clear();
    }

    fn track_entry(
        tracks: &mut HashMap<u32, TrackStats>,
        track_id: u32,
        media_type: MediaType,
    ) -> &mut TrackStats {
        tracks.entry(track_id).or_insert_with(|| {
            debug!("Profiling new {} track {}", media_type, track_id);
            TrackStats::default()
        })
    }
}
