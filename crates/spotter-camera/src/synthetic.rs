use crate::{frame_bridge, Camera, CameraAccess, CameraConfig, CameraError, Frame, FrameStream};
use spotter_base::Tensor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Deterministic camera for tests and machines without capture hardware.
///
/// Produces either a scripted list of frames (in order, exactly once each)
/// or an endless procedural gradient. Honors the same access and lifecycle
/// contract as real hardware: a denied camera starts nothing and its stream
/// stays empty.
pub struct SyntheticCamera {
    config: CameraConfig,
    access: CameraAccess,
    script: Option<Vec<Tensor<u8>>>,
    frame_limit: Option<u64>,
    stream: Option<FrameStream>,
    stop_flag: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl SyntheticCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            config,
            access: CameraAccess::Granted,
            script: None,
            frame_limit: None,
            stream: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        }
    }

    /// Override the access outcome (tests exercise the denied path this way).
    pub fn with_access(mut self, access: CameraAccess) -> Self {
        self.access = access;
        self
    }

    /// Produce exactly these frames, then end the stream.
    pub fn with_frames(mut self, frames: Vec<Tensor<u8>>) -> Self {
        self.script = Some(frames);
        self
    }

    /// Cap procedural generation at `limit` frames, then end the stream.
    pub fn with_frame_limit(mut self, limit: u64) -> Self {
        self.frame_limit = Some(limit);
        self
    }

    fn ensure_started(&mut self) -> Result<(), CameraError> {
        if self.stream.is_some() {
            return Ok(());
        }
        self.start()
    }

    fn generate(config: &CameraConfig, seq: u64) -> Tensor<u8> {
        let (w, h) = (config.width() as usize, config.height() as usize);
        let mut data = Vec::with_capacity(w * h * 3);
        for y in 0..h {
            for x in 0..w {
                data.push((x * 255 / w.max(1)) as u8);
                data.push((y * 255 / h.max(1)) as u8);
                data.push(seq as u8);
            }
        }
        // Shape and data length agree by construction.
        Tensor::new(vec![h, w, 3], data).expect("generated frame shape")
    }
}

impl Camera for SyntheticCamera {
    async fn recv(&mut self) -> Result<Frame, CameraError> {
        self.ensure_started()?;
        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| CameraError::Channel("stream not initialized".to_string()))?;
        stream.next().await.ok_or(CameraError::Stopped)
    }

    fn start(&mut self) -> Result<(), CameraError> {
        if self.stream.is_some() {
            return Ok(());
        }

        let (tx, rx) = frame_bridge(self.config.bridge_capacity());
        self.stream = Some(rx);

        if !self.access.is_granted() {
            // Dropping the sender right away leaves a stream that never
            // yields: the observable shape of denied access.
            log::info!("synthetic camera: access denied, producing no frames");
            drop(tx);
            return Ok(());
        }

        let config = self.config.clone();
        let script = self.script.take();
        let frame_limit = self.frame_limit;
        let stop_flag = self.stop_flag.clone();

        let handle = thread::spawn(move || {
            let interval = if config.fps() > 0 {
                Some(Duration::from_secs_f64(1.0 / config.fps() as f64))
            } else {
                None
            };
            let mut seq: u64 = 0;
            loop {
                if stop_flag.load(Ordering::Acquire) {
                    break;
                }
                let pixels = match &script {
                    Some(frames) => {
                        if seq as usize >= frames.len() {
                            break;
                        }
                        frames[seq as usize].clone()
                    }
                    None => {
                        if frame_limit.is_some_and(|limit| seq >= limit) {
                            break;
                        }
                        Self::generate(&config, seq)
                    }
                };
                if !tx.push(Frame::new(pixels, seq)) {
                    break;
                }
                seq += 1;
                if let Some(interval) = interval {
                    thread::sleep(interval);
                }
            }
        });
        self.thread_handle = Some(handle);
        Ok(())
    }

    fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Release);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SyntheticCamera {
    fn drop(&mut self) {
        self.stop();
    }
}
