use std::fmt;

#[derive(Debug)]
pub enum CameraError {
    /// Device could not be opened or configured.
    Device(String),
    /// Frame transport between capture thread and consumer failed.
    Channel(String),
    /// Capture buffer could not be decoded into a frame.
    Decode(String),
    /// Capture is stopped; the stream has ended.
    Stopped,
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Device(msg) => write!(f, "device error: {msg}"),
            CameraError::Channel(msg) => write!(f, "channel error: {msg}"),
            CameraError::Decode(msg) => write!(f, "decode error: {msg}"),
            CameraError::Stopped => write!(f, "capture stopped"),
        }
    }
}

impl std::error::Error for CameraError {}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Device(err.to_string())
    }
}

impl From<spotter_image::ImageError> for CameraError {
    fn from(err: spotter_image::ImageError) -> Self {
        CameraError::Decode(err.to_string())
    }
}
