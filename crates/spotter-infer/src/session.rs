use crate::InferError;
use spotter_base::Tensor;
use std::collections::HashMap;

/// A loaded model ready to run.
///
/// `Send` so a forward pass can move onto a blocking worker thread.
pub trait Session: Send {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
