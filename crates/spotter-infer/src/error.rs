use crate::Device;
use std::fmt;

#[derive(Debug)]
pub enum InferError {
    ModelLoad(String),
    Backend(String),
    Shape(String),
    Io(String),
    Config(String),
    InvalidInput {
        name: String,
        expected_names: Vec<String>,
    },
    UnsupportedDevice(Device),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::Backend(msg) => write!(f, "backend error: {msg}"),
            InferError::Shape(msg) => write!(f, "shape error: {msg}"),
            InferError::Io(msg) => write!(f, "io error: {msg}"),
            InferError::Config(msg) => write!(f, "config error: {msg}"),
            InferError::InvalidInput {
                name,
                expected_names,
            } => {
                write!(
                    f,
                    "invalid input '{name}': model expects {expected_names:?}"
                )
            }
            InferError::UnsupportedDevice(device) => {
                write!(f, "unsupported device: {device}")
            }
        }
    }
}

impl std::error::Error for InferError {}

impl From<std::io::Error> for InferError {
    fn from(err: std::io::Error) -> Self {
        InferError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for InferError {
    fn from(err: serde_json::Error) -> Self {
        InferError::Config(err.to_string())
    }
}

impl From<spotter_base::TensorError> for InferError {
    fn from(err: spotter_base::TensorError) -> Self {
        InferError::Shape(err.to_string())
    }
}
