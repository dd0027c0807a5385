use spotter::classify::{self, ClassifyConfig};
use spotter::options;
use spotter::overlay;
use spotter::state::{self, Presentation, StateUpdate};
use spotter_camera::{Camera, CameraConfig, CameraError, Frame, SyntheticCamera};
use spotter_infer::{HeuristicBackend, Invoker};
use std::time::{Duration, Instant};
use tokio::io::AsyncBufReadExt;

/// The capture source picked at startup. The `Camera` trait is statically
/// dispatched, so the choice lives in an enum rather than a Box.
enum CameraSource {
    Synthetic(SyntheticCamera),
    #[cfg(feature = "v4l2")]
    V4l2(spotter_camera::V4l2Camera),
}

impl Camera for CameraSource {
    async fn recv(&mut self) -> Result<Frame, CameraError> {
        match self {
            CameraSource::Synthetic(camera) => camera.recv().await,
            #[cfg(feature = "v4l2")]
            CameraSource::V4l2(camera) => camera.recv().await,
        }
    }

    fn start(&mut self) -> Result<(), CameraError> {
        match self {
            CameraSource::Synthetic(camera) => camera.start(),
            #[cfg(feature = "v4l2")]
            CameraSource::V4l2(camera) => camera.start(),
        }
    }

    fn stop(&mut self) {
        match self {
            CameraSource::Synthetic(camera) => camera.stop(),
            #[cfg(feature = "v4l2")]
            CameraSource::V4l2(camera) => camera.stop(),
        }
    }
}

fn open_camera(opts: &options::Options) -> CameraSource {
    let config = CameraConfig::default()
        .with_device(opts.device.clone())
        .with_width(opts.width)
        .with_height(opts.height)
        .with_fps(opts.fps);

    if opts.synthetic {
        log::info!("using synthetic camera at {}x{}", opts.width, opts.height);
        return CameraSource::Synthetic(SyntheticCamera::new(config));
    }

    #[cfg(feature = "v4l2")]
    {
        match spotter_camera::V4l2Camera::new(config.clone()) {
            Ok(camera) => return CameraSource::V4l2(camera),
            Err(err) => {
                // Configuration failure is soft: run on with an empty
                // stream, exactly like a denied camera.
                log::error!("camera configuration failed: {err}");
                return CameraSource::Synthetic(
                    SyntheticCamera::new(config)
                        .with_access(spotter_camera::CameraAccess::Denied),
                );
            }
        }
    }

    #[cfg(not(feature = "v4l2"))]
    {
        log::info!("built without the v4l2 feature; using synthetic camera");
        CameraSource::Synthetic(SyntheticCamera::new(config))
    }
}

#[tokio::main]
async fn main() {
    spotter_base::init_stdout_logger();

    let opts = match options::parse(std::env::args().skip(1)) {
        Ok(opts) => opts,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let labels = match &opts.labels {
        Some(path) => match spotter_infer::load_labels(path) {
            Ok(labels) => labels,
            Err(err) => {
                spotter_base::log_fatal!(
                    "failed to load labels from {}: {err}",
                    path.display()
                );
            }
        },
        None => HeuristicBackend::labels(),
    };

    let mut camera = open_camera(&opts);
    if let Err(err) = camera.start() {
        log::error!("failed to start capture: {err}");
    }

    let presentation = Presentation::spawn();
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    // Forward frames from the camera into the presentation state, in
    // capture order, until the stream ends or shutdown is requested.
    let pipeline = {
        let state = presentation.handle();
        let mut shutdown = shutdown_rx.clone();
        tokio::spawn(async move {
            let mut frames: u64 = 0;
            let mut last_health = Instant::now();
            loop {
                tokio::select! {
                    result = camera.recv() => match result {
                        Ok(frame) => {
                            frames += 1;
                            state.send(StateUpdate::Frame(frame)).await;
                            if last_health.elapsed() >= Duration::from_secs(5) {
                                log::debug!("pipeline: {frames} frames forwarded");
                                last_health = Instant::now();
                            }
                        }
                        Err(CameraError::Stopped) => {
                            log::info!("frame stream ended after {frames} frames");
                            break;
                        }
                        Err(err) => {
                            log::error!("camera error: {err}");
                            break;
                        }
                    },
                    _ = shutdown.changed() => {
                        camera.stop();
                        log::info!("capture stopped after {frames} frames");
                        break;
                    }
                }
            }
        })
    };

    // Print every overlay change to the terminal.
    let reporter = {
        let mut snapshots = presentation.subscribe();
        tokio::spawn(async move {
            let mut last = state::Overlay::None;
            while snapshots.changed().await.is_ok() {
                let overlay = snapshots.borrow_and_update().overlay.clone();
                if overlay != last {
                    println!("{}", overlay::describe(&overlay));
                    last = overlay;
                }
            }
        })
    };

    #[cfg(feature = "display")]
    let display = spawn_display(presentation.subscribe(), shutdown_tx.clone());

    println!("spotter ready. <enter>/c classify, m toggle mode, p toggle profile, q quit");

    let mut invoker = Invoker::new();
    let mut mode = opts.mode;
    let mut profile = opts.profile;

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    let mut shutdown_seen = shutdown_rx.clone();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = shutdown_seen.changed() => break,
        };
        let Ok(Some(line)) = line else { break };
        match line.trim() {
            "" | "c" => {
                let config = ClassifyConfig {
                    mode,
                    profile,
                    fast_model: opts.fast_model.clone(),
                    accurate_model: opts.accurate_model.clone(),
                    labels: labels.clone(),
                };
                classify::trigger(
                    &mut invoker,
                    config,
                    presentation.handle(),
                    &presentation.current(),
                );
            }
            "m" => {
                mode = mode.toggled();
                log::info!("mode: {mode}");
            }
            "p" => {
                profile = profile.toggled();
                log::info!("profile: {profile}");
            }
            "q" => break,
            other => log::warn!("unknown command: {other}"),
        }
    }

    let _ = shutdown_tx.send(true);
    invoker.join().await;
    let _ = pipeline.await;
    presentation.shutdown().await;
    let _ = reporter.await;
    #[cfg(feature = "display")]
    let _ = display.join();
    log::info!("done");
}

/// Window thread: renders the latest snapshot at the display rate and
/// requests shutdown when the window closes.
#[cfg(feature = "display")]
fn spawn_display(
    snapshots: tokio::sync::watch::Receiver<state::Snapshot>,
    shutdown: tokio::sync::watch::Sender<bool>,
) -> std::thread::JoinHandle<()> {
    use minifb::{Key, Window, WindowOptions};

    std::thread::spawn(move || {
        let mut window: Option<Window> = None;
        loop {
            if *shutdown.borrow() {
                break;
            }
            let snapshot = snapshots.borrow().clone();
            let Some((buf, width, height)) = overlay::render::compose(&snapshot) else {
                std::thread::sleep(std::time::Duration::from_millis(50));
                continue;
            };

            if window.is_none() {
                match Window::new("spotter - ESC to exit", width, height, WindowOptions::default())
                {
                    Ok(mut win) => {
                        win.set_target_fps(30);
                        window = Some(win);
                    }
                    Err(err) => {
                        log::error!("cannot open display window: {err}");
                        break;
                    }
                }
            }
            let Some(win) = window.as_mut() else { break };

            if !win.is_open() || win.is_key_down(Key::Escape) {
                break;
            }
            if let Err(err) = win.update_with_buffer(&buf, width, height) {
                log::error!("display update failed: {err}");
                break;
            }
        }
        let _ = shutdown.send(true);
    })
}
