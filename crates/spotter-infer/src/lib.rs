//! On-device inference for the spotter pipeline.
//!
//! A frame goes in; either labeled bounding boxes (detection mode) or a
//! single best-guess label (classification mode) come out. Models load
//! through the `Backend`/`Session` seam: the `onnx` feature provides an
//! `ort`-backed session, and `HeuristicBackend` is a deterministic built-in
//! used by tests and by installations without a model file.
//!
//! Invocation is one-shot per user trigger. The `Invoker` guards against
//! overlapping triggers by aborting the in-flight run before dispatching
//! the next one.

pub mod backend;
pub mod backends;
pub mod classifier;
pub mod detection;
pub mod detector;
pub mod device;
pub mod error;
pub mod invoker;
pub mod labels;
pub mod modelsource;
pub mod preprocess;
pub mod profile;
pub mod session;

pub use backend::Backend;
pub use backends::HeuristicBackend;
#[cfg(feature = "onnx")]
pub use backends::OnnxBackend;
pub use classifier::{LabelClassifier, NOTHING_RECOGNIZED};
pub use detection::Detection;
pub use detector::Detector;
pub use device::Device;
pub use error::InferError;
pub use invoker::Invoker;
pub use labels::load_labels;
pub use modelsource::ModelSource;
pub use profile::ModelProfile;
pub use session::Session;
