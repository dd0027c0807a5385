use spotter_base::Tensor;
use spotter_camera::{Camera, CameraAccess, CameraConfig, CameraError, SyntheticCamera};

fn marked_frame(mark: u8) -> Tensor<u8> {
    Tensor::filled(vec![4, 4, 3], mark).unwrap()
}

#[tokio::test]
async fn test_scripted_frames_arrive_in_capture_order() {
    let script = vec![marked_frame(1), marked_frame(2), marked_frame(3)];
    let config = CameraConfig::default().with_fps(0).with_bridge_capacity(8);
    let mut camera = SyntheticCamera::new(config).with_frames(script);

    let mut seen = Vec::new();
    loop {
        match camera.recv().await {
            Ok(frame) => seen.push((frame.seq(), frame.pixels().data[0])),
            Err(CameraError::Stopped) => break,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    // Exactly B1 then B2 then B3: no duplicates, no reordering.
    assert_eq!(seen, vec![(0, 1), (1, 2), (2, 3)]);
}

#[tokio::test]
async fn test_denied_access_produces_no_frames() {
    let mut camera = SyntheticCamera::new(CameraConfig::default().with_fps(0))
        .with_access(CameraAccess::Denied);

    // The stream terminates without ever yielding a frame.
    match camera.recv().await {
        Err(CameraError::Stopped) => {}
        Ok(frame) => panic!("denied camera produced frame seq={}", frame.seq()),
        Err(other) => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_frame_limit_ends_stream() {
    let config = CameraConfig::default()
        .with_width(8)
        .with_height(8)
        .with_fps(0)
        .with_bridge_capacity(16);
    let mut camera = SyntheticCamera::new(config).with_frame_limit(5);

    let mut count = 0;
    while let Ok(frame) = camera.recv().await {
        assert_eq!(frame.seq(), count);
        count += 1;
    }
    assert_eq!(count, 5);
}

#[tokio::test]
async fn test_generated_frames_have_configured_shape() {
    let config = CameraConfig::default()
        .with_width(32)
        .with_height(16)
        .with_fps(0);
    let mut camera = SyntheticCamera::new(config).with_frame_limit(1);

    let frame = camera.recv().await.unwrap();
    assert_eq!(frame.width(), 32);
    assert_eq!(frame.height(), 16);
    assert_eq!(frame.pixels().shape, vec![16, 32, 3]);
}

#[tokio::test]
async fn test_stop_ends_stream() {
    let config = CameraConfig::default()
        .with_width(8)
        .with_height(8)
        .with_fps(0)
        .with_bridge_capacity(2);
    let mut camera = SyntheticCamera::new(config);

    // Pull one frame so capture is definitely running, then stop. The
    // bridge may already have evicted early frames, so only the fact of
    // delivery matters here, not the sequence number.
    camera.recv().await.unwrap();
    camera.stop();

    // Whatever was already queued drains, then the stream ends.
    loop {
        match camera.recv().await {
            Ok(_) => continue,
            Err(CameraError::Stopped) => break,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}

#[tokio::test]
async fn test_stop_is_idempotent() {
    let mut camera = SyntheticCamera::new(CameraConfig::default().with_fps(0)).with_frame_limit(1);
    camera.start().unwrap();
    camera.stop();
    camera.stop();
}
