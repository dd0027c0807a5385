use crate::{frame_bridge, Camera, CameraAccess, CameraConfig, CameraError, Frame, FrameSender, FrameStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use v4l::buffer::Type;
use v4l::io::mmap::Stream as MmapStream;
use v4l::io::traits::CaptureStream;
use v4l::video::Capture;
use v4l::{Device, Format, FourCC};

/// V4L2 camera backend.
///
/// Construction probes access and, when granted, opens the device and
/// negotiates MJPEG at the requested resolution. `start()` spawns a
/// dedicated capture thread that decodes each buffer and pushes frames into
/// the bridge; `stop()` signals the thread and joins it, releasing the
/// device. A frame that fails to decode is dropped and capture continues.
pub struct V4l2Camera {
    config: CameraConfig,
    access: CameraAccess,
    device: Option<Device>,
    stream: Option<FrameStream>,
    stop_flag: Arc<AtomicBool>,
    thread_handle: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for V4l2Camera {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Camera")
            .field("config", &self.config)
            .field("access", &self.access)
            .field("device", &self.device.is_some())
            .field("running", &self.thread_handle.is_some())
            .finish()
    }
}

impl V4l2Camera {
    /// Open and configure the device named by `config`.
    ///
    /// Denied access is not an error: the camera constructs, `start()` does
    /// nothing, and the stream stays empty. Configuration problems on a
    /// *granted* device (unsupported format, open failure after the probe)
    /// do return `CameraError::Device`.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let access = CameraAccess::probe(config.device());
        if !access.is_granted() {
            log::info!(
                "camera access denied for {}; no frames will be produced",
                config.device()
            );
            return Ok(Self {
                config,
                access,
                device: None,
                stream: None,
                stop_flag: Arc::new(AtomicBool::new(false)),
                thread_handle: None,
            });
        }

        let device = Device::with_path(config.device())?;

        // Negotiate MJPEG at the requested resolution. The device may
        // counter with a different format; only MJPEG is accepted.
        let mut format = Format::new(config.width(), config.height(), FourCC::new(b"MJPG"));
        format = Capture::set_format(&device, &format)?;
        if format.fourcc != FourCC::new(b"MJPG") {
            return Err(CameraError::Device(
                "MJPEG format not supported by device".to_string(),
            ));
        }

        let params = v4l::video::capture::Parameters::with_fps(config.fps());
        v4l::video::Capture::set_params(&device, &params)?;

        Ok(Self {
            config,
            access,
            device: Some(device),
            stream: None,
            stop_flag: Arc::new(AtomicBool::new(false)),
            thread_handle: None,
        })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    fn ensure_started(&mut self) -> Result<(), CameraError> {
        if self.stream.is_some() {
            return Ok(());
        }
        self.start()
    }

    /// Capture loop, run on its own thread.
    fn capture_loop(
        device: Device,
        tx: FrameSender,
        buffer_count: usize,
        stop_flag: Arc<AtomicBool>,
    ) -> Result<(), CameraError> {
        let mut stream = MmapStream::with_buffers(&device, Type::VideoCapture, buffer_count as u32)?;
        let mut seq: u64 = 0;

        loop {
            if stop_flag.load(Ordering::Acquire) {
                break;
            }

            let (buffer, _metadata) = CaptureStream::next(&mut stream)?;

            // The mmap buffer is only valid until the next dequeue.
            let bytes = buffer.to_vec();

            let pixels = match spotter_image::decode_rgb(&bytes) {
                Ok(tensor) => tensor,
                Err(err) => {
                    // One bad buffer is not a stream failure.
                    log::debug!("dropping undecodable frame: {err}");
                    continue;
                }
            };

            if !tx.push(Frame::new(pixels, seq)) {
                break;
            }
            seq += 1;
        }

        Ok(())
    }
}

impl Camera for V4l2Camera {
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

        let Some(device) = self.device.take() else {
            // Access denied, or the device was already consumed by an
            // earlier start/stop cycle. Either way the stream stays empty.
            drop(tx);
            return Ok(());
        };

        let buffer_count = self.config.bridge_capacity();
        let stop_flag = self.stop_flag.clone();
        let handle = thread::spawn(move || {
            if let Err(e) = Self::capture_loop(device, tx, buffer_count, stop_flag) {
                log::error!("capture thread error: {e}");
            }
        });
        self.thread_handle = Some(handle);
        Ok(())
    }

    fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Release);
        // Dropping the receiver makes the next push fail, unblocking a
        // capture thread parked inside the driver dequeue.
        drop(self.stream.take());
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for V4l2Camera {
    fn drop(&mut self) {
        self.stop();
    }
}
