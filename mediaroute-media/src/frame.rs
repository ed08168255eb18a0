//! Decoded media frames
//!
//! A [`MediaFrame`] holds one decoded video picture or block of audio
//! samples as up to [`MAX_PLANES`](crate::planes::MAX_PLANES) independently sized byte planes, plus the
//! geometry and sample metadata describing them. Metadata is advisory: none
//! of the setters validate against plane contents or against each other.
//!
//! Frames are exclusively owned. A stage mutates a frame in place and hands
//! it on by value; `Clone` is a full deep copy.

use crate::limits::BufferLimits;
use crate::planes::{check_plane_index, Planes};
use bitflags::bitflags;
use mediaroute_core::{
    AudioChannelLayout, BoundsError, MediaPacketFlag, MediaResult, MediaRouteError, MediaType,
};
use std::fmt;
use tracing::{debug, trace};

bitflags! {
    /// Flags carried by a decoded frame.
    ///
    /// Bits outside the named flags are preserved so stages can carry their
    /// own markers through.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FrameFlags: u32 {
        /// Frame decoded from a random-access point
        const KEY = 0x0001;
    }
}

impl From<MediaPacketFlag> for FrameFlags {
    fn from(flag: MediaPacketFlag) -> Self {
        match flag {
            MediaPacketFlag::NoFlag => FrameFlags::empty(),
            MediaPacketFlag::Key => FrameFlags::KEY,
        }
    }
}

/// One decoded video or audio unit
#[derive(Clone, Default)]
pub struct MediaFrame {
    planes: Planes<Vec<u8>>,
    stride: Planes<u32>,

    media_type: MediaType,
    track_id: u32,
    pts: i64,
    offset: usize,
    flags: FrameFlags,

    // Video
    width: u32,
    height: u32,
    format: i32,

    // Audio
    bytes_per_sample: u32,
    nb_samples: u32,
    channels: u32,
    channel_layout: AudioChannelLayout,
    sample_rate: u32,

    limits: BufferLimits,
}

impl MediaFrame {
    /// Create an empty frame with every field unset
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty frame whose planes are capped by `limits`
    pub fn with_limits(limits: BufferLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    /// Create a frame whose primary plane holds a copy of `data`
    pub fn with_data(
        media_type: MediaType,
        track_id: u32,
        data: &[u8],
        pts: i64,
        flags: FrameFlags,
    ) -> MediaResult<Self> {
        let mut frame = Self {
            media_type,
            track_id,
            pts,
            flags,
            ..Self::default()
        };
        frame.set_buffer(data, 0)?;
        Ok(frame)
    }

    // ------------------------------------------------------------------
    // Plane contents
    // ------------------------------------------------------------------

    /// Replace a plane's contents with a copy of `data`
    pub fn set_buffer(&mut self, data: &[u8], plane: usize) -> MediaResult<()> {
        let buf = self.plane_with_room(plane, data.len())?;
        buf.clear();
        buf.extend_from_slice(data);
        Ok(())
    }

    /// Copy `data` onto the end of a plane
    pub fn append_buffer(&mut self, data: &[u8], plane: usize) -> MediaResult<()> {
        let required = self.required_size(plane, data.len())?;
        let buf = self.plane_with_room(plane, required)?;
        buf.extend_from_slice(data);
        Ok(())
    }

    /// Push a single byte onto the end of a plane
    pub fn append_byte(&mut self, byte: u8, plane: usize) -> MediaResult<()> {
        let required = self.required_size(plane, 1)?;
        let buf = self.plane_with_room(plane, required)?;
        buf.push(byte);
        Ok(())
    }

    /// Splice `data` into a plane at `offset`, shifting the tail right.
    ///
    /// `offset` may equal the plane size, which appends.
    pub fn insert_buffer(&mut self, offset: usize, data: &[u8], plane: usize) -> MediaResult<()> {
        check_plane_index(plane)?;
        let size = self.data_size(plane);
        if offset > size {
            return Err(self.bounds_error(plane, offset, data.len()));
        }
        if data.is_empty() {
            return Ok(());
        }

        let required = self.required_size(plane, data.len())?;
        let buf = self.plane_with_room(plane, required)?;
        buf.extend_from_slice(data);
        buf[offset..].rotate_right(data.len());
        Ok(())
    }

    /// Remove `length` bytes at `offset`, shifting the tail left
    pub fn erase_buffer(&mut self, offset: usize, length: usize, plane: usize) -> MediaResult<()> {
        check_plane_index(plane)?;
        let size = self.data_size(plane);
        let end = match offset.checked_add(length) {
            Some(end) if end <= size => end,
            _ => return Err(self.bounds_error(plane, offset, length)),
        };

        if let Some(buf) = self.planes.get_mut(plane) {
            buf.drain(offset..end);
        }
        Ok(())
    }

    /// Make sure a plane can hold `capacity` bytes without reallocating.
    /// The logical size is unchanged.
    pub fn reserve(&mut self, capacity: usize, plane: usize) -> MediaResult<()> {
        self.plane_with_room(plane, capacity)?;
        Ok(())
    }

    /// Set a plane's logical size. Bytes added at the end are zeroed.
    ///
    /// Decoders typically resize once and then write through
    /// [`direct_buffer_mut`](Self::direct_buffer_mut).
    pub fn resize(&mut self, size: usize, plane: usize) -> MediaResult<()> {
        let buf = self.plane_with_room(plane, size)?;
        buf.resize(size, 0);
        Ok(())
    }

    /// Truncate a plane to empty, keeping its entry
    pub fn clear_buffer(&mut self, plane: usize) -> MediaResult<()> {
        self.planes.get_or_insert_default(plane)?.clear();
        Ok(())
    }

    /// Contents of a plane; empty for a plane that was never written
    pub fn buffer(&self, plane: usize) -> &[u8] {
        self.planes.get(plane).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Direct-write access to an existing plane.
    ///
    /// This is the one path that bypasses the frame's bookkeeping: writes go
    /// straight into the plane, so the caller is responsible for keeping
    /// stride, geometry, and offset consistent with what it writes. Returns
    /// `None` for a plane that was never written; `resize` it first.
    pub fn direct_buffer_mut(&mut self, plane: usize) -> Option<&mut [u8]> {
        self.planes.get_mut(plane).map(Vec::as_mut_slice)
    }

    /// Byte at `offset` in a plane.
    ///
    /// A plane that was never written reads as `0`; an offset past the end of
    /// an existing plane is an error.
    pub fn byte_at(&self, offset: usize, plane: usize) -> MediaResult<u8> {
        match self.planes.get(plane) {
            None => Ok(0),
            Some(buf) => buf
                .get(offset)
                .copied()
                .ok_or_else(|| self.bounds_error(plane, offset, 1)),
        }
    }

    /// Logical size of a plane in bytes
    pub fn data_size(&self, plane: usize) -> usize {
        self.planes.get(plane).map_or(0, Vec::len)
    }

    /// Logical size of a plane in bytes. Same as [`data_size`](Self::data_size).
    pub fn buffer_size(&self, plane: usize) -> usize {
        self.data_size(plane)
    }

    /// Bytes a plane can hold before reallocating
    pub fn buffer_capacity(&self, plane: usize) -> usize {
        self.planes.get(plane).map_or(0, Vec::capacity)
    }

    /// Whether a plane has an entry
    pub fn has_plane(&self, plane: usize) -> bool {
        self.planes.is_set(plane)
    }

    /// Number of planes with an entry
    pub fn plane_count(&self) -> usize {
        self.planes.count()
    }

    /// Planes with an entry, in index order
    pub fn planes(&self) -> impl Iterator<Item = (usize, &[u8])> {
        self.planes.iter().map(|(plane, buf)| (plane, buf.as_slice()))
    }

    fn required_size(&self, plane: usize, additional: usize) -> MediaResult<usize> {
        self.data_size(plane)
            .checked_add(additional)
            .ok_or(MediaRouteError::AllocationFailed {
                requested: usize::MAX,
            })
    }

    /// Plane with capacity for at least `required` bytes, created on first
    /// use. Nothing is modified when this fails.
    fn plane_with_room(&mut self, plane: usize, required: usize) -> MediaResult<&mut Vec<u8>> {
        check_plane_index(plane)?;
        if let Err(err) = self.limits.check_plane(required) {
            debug!(
                "Plane {} of track {} rejected growth to {} bytes",
                plane, self.track_id, required
            );
            return Err(err);
        }

        if !self.planes.is_set(plane) {
            let mut buf = Vec::new();
            buf.try_reserve_exact(required)
                .map_err(|_| MediaRouteError::allocation(required))?;
            self.planes.set(plane, buf)?;
            trace!(
                "Allocated plane {} of track {} with {} bytes",
                plane,
                self.track_id,
                required
            );
        }

        let buf = self.planes.get_or_insert_default(plane)?;
        if let Some(additional) = required.checked_sub(buf.len()) {
            buf.try_reserve(additional)
                .map_err(|_| MediaRouteError::allocation(required))?;
        }
        Ok(buf)
    }

    fn bounds_error(&self, plane: usize, offset: usize, length: usize) -> MediaRouteError {
        BoundsError {
            plane,
            offset,
            length,
            size: self.data_size(plane),
        }
        .into()
    }

    // ------------------------------------------------------------------
    // Common metadata
    // ------------------------------------------------------------------

    /// Payload kind
    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    /// Set the payload kind
    pub fn set_media_type(&mut self, media_type: MediaType) {
        self.media_type = media_type;
    }

    /// Logical stream this frame belongs to
    pub fn track_id(&self) -> u32 {
        self.track_id
    }

    /// Remap the frame to another track
    pub fn set_track_id(&mut self, track_id: u32) {
        self.track_id = track_id;
    }

    /// Presentation timestamp
    pub fn pts(&self) -> i64 {
        self.pts
    }

    /// Set the presentation timestamp
    pub fn set_pts(&mut self, pts: i64) {
        self.pts = pts;
    }

    /// Frame flags
    pub fn flags(&self) -> FrameFlags {
        self.flags
    }

    /// Replace the frame flags
    pub fn set_flags(&mut self, flags: FrameFlags) {
        self.flags = flags;
    }

    /// Whether the frame carries the key flag
    pub fn is_keyframe(&self) -> bool {
        self.flags.contains(FrameFlags::KEY)
    }

    /// Bytes of the primary plane already consumed
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Move the consumption cursor
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Advance the consumption cursor by `delta`, returning the new cursor.
    ///
    /// Fails without moving the cursor if it would overflow.
    pub fn increase_offset(&mut self, delta: usize) -> MediaResult<usize> {
        self.offset = self
            .offset
            .checked_add(delta)
            .ok_or(MediaRouteError::OffsetOverflow {
                offset: self.offset,
                delta,
            })?;
        Ok(self.offset)
    }

    /// Limits applied to plane growth
    pub fn limits(&self) -> BufferLimits {
        self.limits
    }

    /// Replace the plane growth limits. Existing contents are kept even if
    /// they exceed the new limits.
    pub fn set_limits(&mut self, limits: BufferLimits) {
        self.limits = limits;
    }

    // ------------------------------------------------------------------
    // Video metadata
    // ------------------------------------------------------------------

    /// Row width in bytes of a plane; 0 when not set
    pub fn stride(&self, plane: usize) -> u32 {
        self.stride.get(plane).copied().unwrap_or(0)
    }

    /// Set the row width of a plane. A stride of 0 marks it as not set.
    pub fn set_stride(&mut self, stride: u32, plane: usize) -> MediaResult<()> {
        if stride == 0 {
            check_plane_index(plane)?;
            self.stride.remove(plane);
            return Ok(());
        }
        self.stride.set(plane, stride)
    }

    /// Picture width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Set the picture width
    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    /// Picture height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Set the picture height
    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }

    /// Pixel or sample format code, opaque to this crate
    pub fn format(&self) -> i32 {
        self.format
    }

    /// Set the format code
    pub fn set_format(&mut self, format: i32) {
        self.format = format;
    }

    // ------------------------------------------------------------------
    // Audio metadata
    // ------------------------------------------------------------------

    /// Bytes per sample
    pub fn bytes_per_sample(&self) -> u32 {
        self.bytes_per_sample
    }

    /// Set the bytes per sample
    pub fn set_bytes_per_sample(&mut self, bytes_per_sample: u32) {
        self.bytes_per_sample = bytes_per_sample;
    }

    /// Samples per channel
    pub fn nb_samples(&self) -> u32 {
        self.nb_samples
    }

    /// Set the samples per channel
    pub fn set_nb_samples(&mut self, nb_samples: u32) {
        self.nb_samples = nb_samples;
    }

    /// Channel count
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Set the channel count. Not checked against the channel layout.
    pub fn set_channels(&mut self, channels: u32) {
        self.channels = channels;
    }

    /// Channel layout
    pub fn channel_layout(&self) -> AudioChannelLayout {
        self.channel_layout
    }

    /// Set the channel layout. Not checked against the channel count.
    pub fn set_channel_layout(&mut self, channel_layout: AudioChannelLayout) {
        self.channel_layout = channel_layout;
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Set the sample rate in Hz
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
    }
}

impl fmt::Debug for MediaFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plane_sizes: Vec<(usize, usize)> =
            self.planes.iter().map(|(plane, buf)| (plane, buf.len())).collect();

        f.debug_struct("MediaFrame")
            .field("media_type", &self.media_type)
            .field("track_id", &self.track_id)
            .field("pts", &self.pts)
            .field("flags", &self.flags)
            .field("offset", &self.offset)
            .field("plane_sizes", &plane_sizes)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("nb_samples", &self.nb_samples)
            .field("channels", &self.channels)
            .field("sample_rate", &self.sample_rate)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for MediaFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MediaFrame {} track: {}, pts: {}, planes: {}",
            self.media_type,
            self.track_id,
            self.pts,
            self.plane_count()
        )?;
        match self.media_type {
            MediaType::Video => write!(
                f,
                ", {}x{}, format: {}",
                self.width, self.height, self.format
            ),
            MediaType::Audio => write!(
                f,
                ", {} samples, {} ch @ {} Hz",
                self.nb_samples, self.channels, self.sample_rate
            ),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planes::MAX_PLANES;

    #[test]
    fn test_new_frame_is_unset() {
        let frame = MediaFrame::new();
        assert_eq!(frame.media_type(), MediaType::Unknown);
        assert_eq!(frame.plane_count(), 0);
        assert_eq!(frame.data_size(0), 0);
        assert_eq!(frame.buffer(0), &[] as &[u8]);
        assert_eq!(frame.byte_at(0, 0), Ok(0));
        assert_eq!(frame.stride(0), 0);
        assert_eq!(frame.channel_layout(), AudioChannelLayout::Mono);
        assert_eq!(frame.flags(), FrameFlags::empty());
    }

    #[test]
    fn test_with_data_sets_primary_plane() {
        let frame =
            MediaFrame::with_data(MediaType::Audio, 2, &[1, 2, 3, 4], 960, FrameFlags::KEY)
                .unwrap();
        assert_eq!(frame.buffer(0), &[1, 2, 3, 4]);
        assert_eq!(frame.track_id(), 2);
        assert_eq!(frame.pts(), 960);
        assert!(frame.is_keyframe());
        assert!(!frame.has_plane(1));
    }

    #[test]
    fn test_insert_and_erase() {
        let mut frame = MediaFrame::new();
        frame.set_buffer(&[1, 2, 5, 6], 0).unwrap();

        frame.insert_buffer(2, &[3, 4], 0).unwrap();
        assert_eq!(frame.buffer(0), &[1, 2, 3, 4, 5, 6]);

        frame.insert_buffer(6, &[7], 0).unwrap();
        frame.insert_buffer(0, &[0], 0).unwrap();
        assert_eq!(frame.buffer(0), &[0, 1, 2, 3, 4, 5, 6, 7]);

        frame.erase_buffer(1, 3, 0).unwrap();
        assert_eq!(frame.buffer(0), &[0, 4, 5, 6, 7]);
    }

    #[test]
    fn test_insert_out_of_bounds() {
        let mut frame = MediaFrame::new();
        frame.set_buffer(&[1, 2, 3], 0).unwrap();

        let err = frame.insert_buffer(4, &[9], 0).unwrap_err();
        assert_eq!(
            err,
            MediaRouteError::OutOfBounds(BoundsError {
                plane: 0,
                offset: 4,
                length: 1,
                size: 3
            })
        );
        assert_eq!(frame.buffer(0), &[1, 2, 3]);
    }

    #[test]
    fn test_erase_out_of_bounds() {
        let mut frame = MediaFrame::new();
        frame.set_buffer(&[1, 2, 3], 1).unwrap();

        assert!(matches!(
            frame.erase_buffer(2, 2, 1),
            Err(MediaRouteError::OutOfBounds(_))
        ));
        assert!(matches!(
            frame.erase_buffer(usize::MAX, 2, 1),
            Err(MediaRouteError::OutOfBounds(_))
        ));
        assert_eq!(frame.buffer(1), &[1, 2, 3]);

        // Erasing nothing from an unset plane is allowed and creates nothing
        frame.erase_buffer(0, 0, 3).unwrap();
        assert!(!frame.has_plane(3));
    }

    #[test]
    fn test_byte_at() {
        let mut frame = MediaFrame::new();
        frame.set_buffer(&[10, 20, 30], 0).unwrap();

        assert_eq!(frame.byte_at(1, 0), Ok(20));
        assert!(matches!(
            frame.byte_at(3, 0),
            Err(MediaRouteError::OutOfBounds(BoundsError { size: 3, .. }))
        ));
        assert_eq!(frame.byte_at(100, 2), Ok(0));
        assert_eq!(frame.byte_at(0, MAX_PLANES + 1), Ok(0));
    }

    #[test]
    fn test_reserve_and_resize() {
        let mut frame = MediaFrame::new();
        frame.reserve(4096, 0).unwrap();
        assert_eq!(frame.data_size(0), 0);
        assert!(frame.buffer_capacity(0) >= 4096);

        frame.resize(4096, 0).unwrap();
        assert_eq!(frame.data_size(0), 4096);
        assert_eq!(frame.buffer_size(0), 4096);

        let buf = frame.direct_buffer_mut(0).unwrap();
        buf[0] = 0x10;
        buf[4095] = 0xEB;
        assert_eq!(frame.byte_at(0, 0), Ok(0x10));
        assert_eq!(frame.byte_at(4095, 0), Ok(0xEB));

        frame.resize(16, 0).unwrap();
        assert_eq!(frame.data_size(0), 16);
    }

    #[test]
    fn test_direct_buffer_mut_requires_plane() {
        let mut frame = MediaFrame::new();
        assert!(frame.direct_buffer_mut(0).is_none());
    }

    #[test]
    fn test_clear_keeps_plane() {
        let mut frame = MediaFrame::new();
        frame.set_buffer(&[1, 2, 3], 2).unwrap();
        frame.clear_buffer(2).unwrap();

        assert!(frame.has_plane(2));
        assert_eq!(frame.data_size(2), 0);
        assert!(frame.byte_at(0, 2).is_err());
    }

    #[test]
    fn test_plane_index_out_of_range() {
        let mut frame = MediaFrame::new();
        let err = frame.append_byte(1, MAX_PLANES).unwrap_err();
        assert_eq!(
            err,
            MediaRouteError::PlaneOutOfRange {
                plane: MAX_PLANES,
                max: MAX_PLANES
            }
        );
        assert!(frame.set_stride(1920, MAX_PLANES).is_err());
        assert_eq!(frame.data_size(MAX_PLANES), 0);
    }

    #[test]
    fn test_limits_reject_growth() {
        let mut frame = MediaFrame::with_limits(BufferLimits {
            max_plane_bytes: Some(8),
        });
        frame.set_buffer(&[0; 6], 0).unwrap();

        let err = frame.append_buffer(&[0; 3], 0).unwrap_err();
        assert_eq!(err, MediaRouteError::AllocationFailed { requested: 9 });
        assert_eq!(frame.data_size(0), 6);

        assert!(frame.resize(9, 1).is_err());
        assert!(!frame.has_plane(1));
    }

    #[test]
    fn test_increase_offset() {
        let mut frame = MediaFrame::new();
        assert_eq!(frame.increase_offset(188), Ok(188));
        assert_eq!(frame.increase_offset(0), Ok(188));
        assert_eq!(frame.offset(), 188);

        frame.set_offset(usize::MAX - 1);
        assert_eq!(
            frame.increase_offset(2),
            Err(MediaRouteError::OffsetOverflow {
                offset: usize::MAX - 1,
                delta: 2
            })
        );
        assert_eq!(frame.offset(), usize::MAX - 1);
    }

    #[test]
    fn test_stride() {
        let mut frame = MediaFrame::new();
        frame.set_stride(1920, 0).unwrap();
        frame.set_stride(960, 1).unwrap();
        assert_eq!(frame.stride(0), 1920);
        assert_eq!(frame.stride(1), 960);
        assert_eq!(frame.stride(2), 0);

        frame.set_stride(0, 1).unwrap();
        assert_eq!(frame.stride(1), 0);
    }

    #[test]
    fn test_frame_flags_from_packet_flag() {
        assert_eq!(FrameFlags::from(MediaPacketFlag::Key), FrameFlags::KEY);
        assert_eq!(FrameFlags::from(MediaPacketFlag::NoFlag), FrameFlags::empty());

        let custom = FrameFlags::from_bits_retain(0x0101);
        assert!(custom.contains(FrameFlags::KEY));
        assert_eq!(custom.bits(), 0x0101);
    }

    #[test]
    fn test_display() {
        let mut frame = MediaFrame::new();
        frame.set_media_type(MediaType::Video);
        frame.set_width(1280);
        frame.set_height(720);
        frame.set_format(0);
        assert_eq!(
            frame.to_string(),
            "MediaFrame video track: 0, pts: 0, planes: 0, 1280x720, format: 0"
        );
    }
}
