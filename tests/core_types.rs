use livematch::{
    Frame, FrameRing, LiveMatchError, MatchOptions, Metric, PixelBuffer, PixelFormat, Plane, Rect,
};

fn frame(seq: u64) -> Frame {
    let pixels =
        PixelBuffer::from_packed(vec![seq as u8; 2 * 2 * 4], 2, 2, PixelFormat::Bgra8).unwrap();
    Frame::new(pixels, seq)
}

#[test]
fn pixel_buffer_validates_geometry() {
    assert_eq!(
        PixelBuffer::from_packed(Vec::new(), 0, 3, PixelFormat::Bgra8).unwrap_err(),
        LiveMatchError::InvalidDimensions { width: 0, height: 3 }
    );
    assert!(matches!(
        PixelBuffer::new(vec![0; 64], 4, 2, 8, PixelFormat::Bgra8),
        Err(LiveMatchError::InvalidStride { .. })
    ));
    assert!(matches!(
        PixelBuffer::new(vec![0; 20], 4, 2, 16, PixelFormat::Bgra8),
        Err(LiveMatchError::BufferTooSmall { .. })
    ));

    // Padded rows: the last row only needs its pixel bytes.
    let padded = PixelBuffer::new(vec![7; 24 + 16], 4, 2, 24, PixelFormat::Rgba8).unwrap();
    assert_eq!(padded.stride(), 24);
    assert_eq!(padded.rgb_at(3, 1), Some([7, 7, 7]));
    assert_eq!(padded.rgb_at(4, 1), None);
}

#[test]
fn pixel_formats_decode_to_rgb() {
    let bgra = PixelBuffer::from_fn(1, 1, PixelFormat::Bgra8, |_, _| [10, 20, 30]).unwrap();
    assert_eq!(&bgra.as_bytes()[..3], &[30, 20, 10]);
    assert_eq!(bgra.rgb_at(0, 0), Some([10, 20, 30]));
    let rgba = PixelBuffer::from_fn(1, 1, PixelFormat::Rgba8, |_, _| [10, 20, 30]).unwrap();
    assert_eq!(rgba.rgb_at(0, 0), Some([10, 20, 30]));
}

#[test]
fn plane_rejects_bad_channel_counts() {
    assert!(Plane::new(vec![0; 8], 2, 2, 2).is_err());
    assert!(Plane::new(vec![0; 12], 2, 2, 3).is_ok());
    assert!(Plane::gray(vec![0; 5], 2, 2).is_err());
}

#[test]
fn ring_keeps_only_the_newest_frames() {
    let ring = FrameRing::new(3);
    for seq in 1..=7 {
        ring.push(frame(seq));
        assert!(ring.len() <= 3);
    }
    let recent: Vec<u64> = ring.recent(3).iter().map(|f| f.sequence()).collect();
    assert_eq!(recent, vec![7, 6, 5]);
    assert_eq!(ring.recent(10).len(), 3);
    assert_eq!(ring.recent(1)[0].sequence(), 7);
    assert_eq!(ring.last().map(|f| f.sequence()), Some(7));
}

#[test]
fn ring_recent_is_empty_before_first_push() {
    let ring = FrameRing::default();
    assert_eq!(ring.capacity(), 30);
    assert!(ring.last().is_none());
    assert!(ring.recent(5).is_empty());
    assert_eq!(ring.latest_sequence(), None);
}

#[test]
fn rect_clamping_and_centres() {
    let roi = Rect::new(-10, 5, 40, 40);
    assert_eq!(roi.clamp_to(20, 30), Some(Rect::new(0, 5, 20, 25)));
    assert_eq!(Rect::new(50, 50, 4, 4).clamp_to(20, 30), None);
    assert_eq!(Rect::new(2, 4, 5, 6).center(), livematch::Point::new(4, 7));
}

#[test]
fn options_default_and_sweep() {
    let options = MatchOptions::default();
    assert_eq!(options.metric, Metric::Zncc);
    assert_eq!(options.scales(), vec![1.0]);
    assert!(options.grayscale);
    assert!(options.require_hard_pass);

    let reversed = MatchOptions {
        scale_min: 1.1,
        scale_max: 0.9,
        scale_step: 0.1,
        ..MatchOptions::default()
    };
    let scales = reversed.scales();
    assert_eq!(scales.len(), 3);
    assert!((scales[0] - 0.9).abs() < 1e-6);

    let degenerate = MatchOptions {
        scale_min: 1.0,
        scale_max: 1.05,
        scale_step: 0.0,
        ..MatchOptions::default()
    };
    assert_eq!(degenerate.scales().len(), 6);
}
