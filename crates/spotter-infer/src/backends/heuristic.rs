use crate::{Backend, Device, InferError, ModelSource, Session};
use spotter_base::Tensor;
use std::collections::HashMap;

/// Deterministic built-in "model".
///
/// No weights, no runtime: the detection head reports grid cells whose
/// brightness variance clears a threshold, and the classification head
/// scores the dominant color channel. Same input, same output, every time.
/// Tests run against it, and so does the app when no model file is given.
pub struct HeuristicBackend;

impl HeuristicBackend {
    pub fn new() -> Self {
        Self
    }

    /// Class labels matching the classification head's score order.
    pub fn labels() -> Vec<String> {
        vec!["red".to_string(), "green".to_string(), "blue".to_string()]
    }
}

impl Default for HeuristicBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for HeuristicBackend {
    fn name(&self) -> &str {
        "heuristic"
    }

    fn load_model(
        &self,
        _model: ModelSource,
        _device: Device,
    ) -> Result<Box<dyn Session>, InferError> {
        // Weights and device are irrelevant; any source loads.
        Ok(Box::new(HeuristicSession {
            input_names: vec!["image".to_string()],
            output_names: vec!["detections".to_string(), "scores".to_string()],
        }))
    }
}

/// Grid resolution of the detection head.
const GRID: usize = 4;

/// Brightness variance a cell must clear to count as an object.
const VARIANCE_THRESHOLD: f32 = 0.005;

pub struct HeuristicSession {
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for HeuristicSession {
    fn run(
        &mut self,
        inputs: &[(&str, Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        let (name, image) = match inputs {
            [(name, image)] => (*name, image),
            _ => {
                return Err(InferError::Backend(format!(
                    "expected exactly one input, got {}",
                    inputs.len()
                )));
            }
        };
        if !self.input_names.iter().any(|n| n == name) {
            return Err(InferError::InvalidInput {
                name: name.to_string(),
                expected_names: self.input_names.clone(),
            });
        }
        if image.shape.len() != 4 || image.shape[0] != 1 || image.shape[1] != 3 {
            return Err(InferError::Shape(format!(
                "expected [1, 3, H, W] input, got {:?}",
                image.shape
            )));
        }

        let h = image.shape[2];
        let w = image.shape[3];
        let plane = h * w;

        let mut rows: Vec<f32> = Vec::new();
        let mut channel_sums = [0.0f32; 3];

        for cy in 0..GRID {
            for cx in 0..GRID {
                let y0 = cy * h / GRID;
                let y1 = (cy + 1) * h / GRID;
                let x0 = cx * w / GRID;
                let x1 = (cx + 1) * w / GRID;
                let count = ((y1 - y0) * (x1 - x0)).max(1) as f32;

                let mut sum = 0.0f32;
                let mut sum_sq = 0.0f32;
                let mut cell_channels = [0.0f32; 3];
                for y in y0..y1 {
                    for x in x0..x1 {
                        let idx = y * w + x;
                        let r = image.data[idx];
                        let g = image.data[plane + idx];
                        let b = image.data[2 * plane + idx];
                        cell_channels[0] += r;
                        cell_channels[1] += g;
                        cell_channels[2] += b;
                        let brightness = (r + g + b) / 3.0;
                        sum += brightness;
                        sum_sq += brightness * brightness;
                    }
                }

                let mean = sum / count;
                let variance = (sum_sq / count - mean * mean).max(0.0);
                if variance > VARIANCE_THRESHOLD {
                    let class = if cell_channels[0] >= cell_channels[1]
                        && cell_channels[0] >= cell_channels[2]
                    {
                        0.0
                    } else if cell_channels[1] >= cell_channels[2] {
                        1.0
                    } else {
                        2.0
                    };
                    let confidence = (variance * 20.0).min(1.0);
                    rows.extend_from_slice(&[
                        cx as f32 / GRID as f32,
                        cy as f32 / GRID as f32,
                        1.0 / GRID as f32,
                        1.0 / GRID as f32,
                        confidence,
                        class,
                    ]);
                }

                channel_sums[0] += cell_channels[0];
                channel_sums[1] += cell_channels[1];
                channel_sums[2] += cell_channels[2];
            }
        }

        let detections = Tensor::new(vec![rows.len() / 6, 6], rows)?;
        let total = (3 * plane) as f32;
        let scores = Tensor::new(
            vec![3],
            vec![
                channel_sums[0] / total,
                channel_sums[1] / total,
                channel_sums[2] / total,
            ],
        )?;

        let mut outputs = HashMap::new();
        outputs.insert("detections".to_string(), detections);
        outputs.insert("scores".to_string(), scores);
        Ok(outputs)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}
