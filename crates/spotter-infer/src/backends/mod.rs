pub mod heuristic;

#[cfg(feature = "onnx")]
pub mod onnx;

pub use heuristic::HeuristicBackend;

#[cfg(feature = "onnx")]
pub use onnx::OnnxBackend;
