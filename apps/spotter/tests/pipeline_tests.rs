use spotter::classify::{trigger, ClassifyConfig, Mode};
use spotter::state::{Overlay, Presentation, Snapshot, StateUpdate};
use spotter_base::Tensor;
use spotter_camera::{Camera, CameraConfig, CameraError, Frame, SyntheticCamera};
use spotter_infer::{HeuristicBackend, Invoker, ModelProfile};

fn marked(value: u8) -> Tensor<u8> {
    Tensor::filled(vec![8, 8, 3], value).unwrap()
}

fn heuristic_config(mode: Mode) -> ClassifyConfig {
    ClassifyConfig {
        mode,
        profile: ModelProfile::Fast,
        fast_model: None,
        accurate_model: None,
        labels: HeuristicBackend::labels(),
    }
}

#[tokio::test]
async fn test_presentation_shows_frames_in_capture_order() {
    let presentation = Presentation::spawn();
    let handle = presentation.handle();
    let mut snapshots = presentation.subscribe();

    let config = CameraConfig::default().with_fps(0).with_bridge_capacity(8);
    let mut camera =
        SyntheticCamera::new(config).with_frames(vec![marked(1), marked(2), marked(3)]);

    let mut history = Vec::new();
    loop {
        match camera.recv().await {
            Ok(frame) => {
                handle.send(StateUpdate::Frame(frame)).await;
                snapshots.changed().await.unwrap();
                let snapshot = snapshots.borrow_and_update().clone();
                history.push(snapshot.frame.unwrap().pixels().data[0]);
            }
            Err(CameraError::Stopped) => break,
            Err(other) => panic!("unexpected camera error: {other}"),
        }
    }

    // Exactly B1 then B2 then B3: no duplicates, no reordering.
    assert_eq!(history, vec![1, 2, 3]);
    drop(handle);
    presentation.shutdown().await;
}

#[tokio::test]
async fn test_trigger_without_frame_invokes_nothing() {
    let presentation = Presentation::spawn();
    let mut invoker = Invoker::new();

    trigger(
        &mut invoker,
        heuristic_config(Mode::Detection),
        presentation.handle(),
        &Snapshot::default(),
    );

    // No model invocation was dispatched and the overlay is untouched.
    assert!(!invoker.is_busy());
    assert_eq!(presentation.current().overlay, Overlay::None);
    presentation.shutdown().await;
}

#[tokio::test]
async fn test_zero_detections_fully_replace_previous_result() {
    let presentation = Presentation::spawn();
    let handle = presentation.handle();
    let mut snapshots = presentation.subscribe();

    handle
        .send(StateUpdate::Label("something".to_string()))
        .await;
    snapshots.changed().await.unwrap();
    snapshots.borrow_and_update();

    handle.send(StateUpdate::Detections(Vec::new())).await;
    snapshots.changed().await.unwrap();

    // An empty detection set is a real outcome, not a no-op: the previous
    // label is gone.
    assert_eq!(
        snapshots.borrow_and_update().overlay,
        Overlay::Detections(Vec::new())
    );
    drop(handle);
    presentation.shutdown().await;
}

#[tokio::test]
async fn test_classification_labels_current_frame() {
    let presentation = Presentation::spawn();
    let mut snapshots = presentation.subscribe();

    // A green frame for the heuristic classification head.
    let mut pixels = marked(0);
    for px in pixels.data.chunks_exact_mut(3) {
        px[1] = 220;
    }
    presentation
        .handle()
        .send(StateUpdate::Frame(Frame::new(pixels, 0)))
        .await;
    snapshots.changed().await.unwrap();
    snapshots.borrow_and_update();

    let mut invoker = Invoker::new();
    trigger(
        &mut invoker,
        heuristic_config(Mode::Classification),
        presentation.handle(),
        &presentation.current(),
    );
    invoker.join().await;
    snapshots.changed().await.unwrap();

    assert_eq!(
        snapshots.borrow_and_update().overlay,
        Overlay::Label("green".to_string())
    );
    presentation.shutdown().await;
}

#[tokio::test]
async fn test_classification_is_idempotent_per_frame() {
    let presentation = Presentation::spawn();
    let mut snapshots = presentation.subscribe();

    let mut pixels = marked(10);
    pixels.data[0] = 250;
    presentation
        .handle()
        .send(StateUpdate::Frame(Frame::new(pixels, 0)))
        .await;
    snapshots.changed().await.unwrap();
    snapshots.borrow_and_update();

    let mut invoker = Invoker::new();
    let mut results = Vec::new();
    for _ in 0..2 {
        trigger(
            &mut invoker,
            heuristic_config(Mode::Classification),
            presentation.handle(),
            &presentation.current(),
        );
        invoker.join().await;
        snapshots.changed().await.unwrap();
        results.push(snapshots.borrow_and_update().overlay.clone());
    }

    // Same unchanged frame, deterministic model: same result both times.
    assert_eq!(results[0], results[1]);
    assert!(matches!(results[0], Overlay::Label(_)));
    presentation.shutdown().await;
}

#[tokio::test]
async fn test_detection_replaces_label_overlay() {
    let presentation = Presentation::spawn();
    let mut snapshots = presentation.subscribe();

    // Uniform frame: the heuristic detector sees nothing in it.
    presentation
        .handle()
        .send(StateUpdate::Frame(Frame::new(marked(40), 0)))
        .await;
    snapshots.changed().await.unwrap();
    snapshots.borrow_and_update();

    presentation
        .handle()
        .send(StateUpdate::Label("stale".to_string()))
        .await;
    snapshots.changed().await.unwrap();
    snapshots.borrow_and_update();

    let mut invoker = Invoker::new();
    trigger(
        &mut invoker,
        heuristic_config(Mode::Detection),
        presentation.handle(),
        &presentation.current(),
    );
    invoker.join().await;
    snapshots.changed().await.unwrap();

    // The run produced zero regions and still replaced the stale label.
    assert_eq!(
        snapshots.borrow_and_update().overlay,
        Overlay::Detections(Vec::new())
    );
    presentation.shutdown().await;
}
