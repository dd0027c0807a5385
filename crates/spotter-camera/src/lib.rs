//! Camera capture for the spotter pipeline.
//!
//! This crate provides the `Camera` trait for async frame capture, backend
//! implementations (`V4l2Camera` behind the `v4l2` feature, `SyntheticCamera`
//! for tests and machines without hardware), and the bounded single-subscriber
//! `frame_bridge` that carries frames from a capture thread to its consumer.
//!
//! Capture is explicitly lifecycled: `start()` begins producing frames,
//! `stop()` releases the device and ends the stream. Dropping a camera also
//! stops it.

pub mod access;
pub mod bridge;
pub mod config;
pub mod error;
pub mod frame;
pub mod synthetic;
pub mod traits;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use access::CameraAccess;
pub use bridge::{frame_bridge, FrameSender, FrameStream};
pub use config::CameraConfig;
pub use error::CameraError;
pub use frame::Frame;
pub use synthetic::SyntheticCamera;
pub use traits::Camera;

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Camera;
