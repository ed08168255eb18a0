//! Integration tests for decoded frames
//!
//! Exercises the plane buffer contract the way decoders and filters use it:
//! incremental construction, pre-sized direct writes, and handing frames
//! between pipeline stages.

use mediaroute_core::{AudioChannelLayout, MediaRouteError, MediaType};
use mediaroute_media::*;

// ============================================================================
// VIDEO FRAME TESTS
// ============================================================================

#[test]
fn test_yuv420_frame_construction() {
    let (width, height) = (64u32, 32u32);
    let luma = (width * height) as usize;
    let chroma = luma / 4;

    let mut frame = MediaFrame::new();
    frame.set_media_type(MediaType::Video);
    frame.set_width(width);
    frame.set_height(height);
    frame.set_format(0);

    for (plane, size, stride) in [(0, luma, width), (1, chroma, width / 2), (2, chroma, width / 2)] {
        frame.resize(size, plane).unwrap();
        frame.set_stride(stride, plane).unwrap();
        frame.direct_buffer_mut(plane).unwrap().fill(plane as u8 + 1);
    }

    assert_eq!(frame.plane_count(), 3);
    assert_eq!(frame.data_size(0), 2048);
    assert_eq!(frame.data_size(1), 512);
    assert_eq!(frame.stride(2), 32);
    assert!(frame.buffer(1).iter().all(|b| *b == 2));

    let sizes: Vec<(usize, usize)> = frame.planes().map(|(i, p)| (i, p.len())).collect();
    assert_eq!(sizes, vec![(0, 2048), (1, 512), (2, 512)]);
}

#[test]
fn test_metadata_independent_of_payload() {
    let mut frame = MediaFrame::new();
    frame.set_width(1920);
    frame.set_height(1080);
    frame.set_format(23);

    assert_eq!(frame.width(), 1920);
    assert_eq!(frame.height(), 1080);
    assert_eq!(frame.format(), 23);
    assert_eq!(frame.plane_count(), 0);

    frame.set_buffer(&[0u8; 10], 0).unwrap();
    frame.erase_buffer(0, 10, 0).unwrap();

    assert_eq!(frame.width(), 1920);
    assert_eq!(frame.height(), 1080);
    assert_eq!(frame.format(), 23);
}

#[test]
fn test_incremental_accumulation() {
    let mut frame = MediaFrame::new();
    let chunks: [&[u8]; 3] = [&[0x00, 0x00, 0x01], &[0x65], &[0x88, 0x84]];

    for chunk in chunks {
        frame.append_buffer(chunk, PRIMARY_PLANE).unwrap();
    }
    frame.append_byte(0x80, PRIMARY_PLANE).unwrap();

    assert_eq!(
        frame.buffer(PRIMARY_PLANE),
        &[0x00, 0x00, 0x01, 0x65, 0x88, 0x84, 0x80]
    );
}

#[test]
fn test_offset_cursor_tracks_consumption() {
    let mut frame = MediaFrame::new();
    frame.set_buffer(&[0u8; 1024], 0).unwrap();

    let mut consumed = 0;
    while frame.offset() < frame.data_size(0) {
        consumed = frame.increase_offset(256).unwrap();
    }

    assert_eq!(consumed, 1024);
    // The cursor is independent of plane contents
    frame.clear_buffer(0).unwrap();
    assert_eq!(frame.offset(), 1024);
}

// ============================================================================
// AUDIO FRAME TESTS
// ============================================================================

#[test]
fn test_planar_audio_frame() {
    let mut frame = MediaFrame::new();
    frame.set_media_type(MediaType::Audio);
    frame.set_sample_rate(48000);
    frame.set_channels(2);
    frame.set_channel_layout(AudioChannelLayout::Stereo);
    frame.set_bytes_per_sample(4);
    frame.set_nb_samples(1024);

    for channel in 0..2 {
        frame.resize(1024 * 4, channel).unwrap();
    }

    assert_eq!(frame.plane_count(), 2);
    assert_eq!(frame.data_size(1), 4096);
    assert_eq!(frame.channel_layout().channel_count(), frame.channels());
}

#[test]
fn test_audio_metadata_is_not_cross_validated() {
    let mut frame = MediaFrame::new();
    frame.set_channels(6);
    frame.set_channel_layout(AudioChannelLayout::Mono);
    frame.set_nb_samples(960);

    assert_eq!(frame.channels(), 6);
    assert_eq!(frame.channel_layout(), AudioChannelLayout::Mono);
    assert_eq!(frame.data_size(0), 0);
}

#[test]
fn test_eight_channel_planar_audio_fits() {
    let mut frame = MediaFrame::new();
    frame.set_channel_layout(AudioChannelLayout::Surround71);

    let channels = frame.channel_layout().channel_count() as usize;
    for plane in 0..channels {
        frame.resize(480 * 2, plane).unwrap();
    }
    assert_eq!(frame.plane_count(), MAX_PLANES);
}

// ============================================================================
// ALLOCATION FAILURE TESTS
// ============================================================================

#[test]
fn test_oversized_resize_fails_without_creating_plane() {
    let mut frame = MediaFrame::new();

    assert_eq!(
        frame.resize(usize::MAX, 0),
        Err(MediaRouteError::AllocationFailed {
            requested: usize::MAX
        })
    );
    assert!(!frame.has_plane(0));
    assert_eq!(frame.plane_count(), 0);
}

#[test]
fn test_oversized_reserve_leaves_plane_unchanged() {
    let mut frame = MediaFrame::new();
    frame.set_buffer(&[1, 2, 3], 0).unwrap();

    assert!(matches!(
        frame.reserve(usize::MAX, 0),
        Err(MediaRouteError::AllocationFailed { .. })
    ));
    assert!(matches!(
        frame.resize(usize::MAX, 0),
        Err(MediaRouteError::AllocationFailed { .. })
    ));
    assert_eq!(frame.buffer(0), &[1, 2, 3]);

    // Still usable afterwards
    frame.append_byte(4, 0).unwrap();
    assert_eq!(frame.buffer(0), &[1, 2, 3, 4]);
}

#[test]
fn test_empty_edits_do_not_create_planes() {
    let mut frame = MediaFrame::new();

    frame.insert_buffer(0, &[], 5).unwrap();
    frame.erase_buffer(0, 0, 5).unwrap();
    assert!(!frame.has_plane(5));

    assert!(matches!(
        frame.insert_buffer(1, &[], 5),
        Err(MediaRouteError::OutOfBounds(_))
    ));
    assert!(!frame.has_plane(5));
}

// ============================================================================
// PIPELINE HANDOFF TESTS
// ============================================================================

#[tokio::test]
async fn test_frame_moves_between_stages() {
    let (tx, mut rx) = tokio::sync::mpsc::channel::<MediaFrame>(2);

    let decoder = tokio::spawn(async move {
        let mut frame = MediaFrame::with_data(
            MediaType::Video,
            1,
            &[16u8; 320],
            3600,
            FrameFlags::KEY,
        )
        .unwrap();
        frame.set_width(16);
        frame.set_height(20);
        tx.send(frame).await.unwrap();
    });

    let mut frame = rx.recv().await.unwrap();
    decoder.await.unwrap();

    // Filter stage mutates in place
    frame.set_track_id(2);
    frame.append_buffer(&[235u8; 16], 0).unwrap();

    assert_eq!(frame.track_id(), 2);
    assert_eq!(frame.data_size(0), 336);
    assert!(frame.is_keyframe());
}

#[test]
fn test_limits_configuration_from_json() {
    let limits: BufferLimits = serde_json::from_str(r#"{"max_plane_bytes": 4096}"#).unwrap();
    let mut frame = MediaFrame::with_limits(limits);

    frame.reserve(4096, 0).unwrap();
    assert!(frame.reserve(4097, 0).is_err());
    assert_eq!(frame.limits(), limits);
}
