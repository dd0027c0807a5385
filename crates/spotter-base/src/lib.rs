//! Shared foundation for the spotter pipeline.
//!
//! Frames travel through the system as HWC `Tensor<u8>` buffers; detection
//! results carry normalized `Rect<f32>` bounding boxes. Logging is the plain
//! `log` facade with a stdout sink.

pub mod logging;
pub mod rect;
pub mod tensor;
pub mod vec2;

pub use logging::{init_stdout_logger, StdoutLogger};
pub use rect::Rect;
pub use tensor::{Tensor, TensorError};
pub use vec2::Vec2;

// Re-export log so downstream crates can use spotter_base::log::*
pub use log;
