use crate::{CameraError, Frame};

/// Async camera trait for frame capture.
///
/// Implementations deliver decoded `Frame`s in capture order. `recv` returns
/// `Err(CameraError::Stopped)` once the source has stopped (explicitly, or
/// because access was denied and capture never started); that is the normal
/// end of a stream, not a fault.
#[allow(async_fn_in_trait)]
pub trait Camera {
    /// Receive the next frame from the camera.
    async fn recv(&mut self) -> Result<Frame, CameraError>;

    /// Begin producing frames. Idempotent.
    fn start(&mut self) -> Result<(), CameraError>;

    /// Stop producing frames and release the device. Idempotent; also runs
    /// on drop.
    fn stop(&mut self);
}
