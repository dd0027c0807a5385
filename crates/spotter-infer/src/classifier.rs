use crate::{preprocess, Backend, Device, InferError, ModelProfile, ModelSource, Session};
use spotter_base::Tensor;
use std::sync::{Arc, Mutex};

/// What classification reports when the model output carries no usable
/// ranking: absent scores, empty scores, or an unexpected shape.
pub const NOTHING_RECOGNIZED: &str = "nothing recognized";

/// Classification-mode front-end: one frame in, one best-guess label out.
///
/// The loaded session is expected to produce a `"scores"` output, one value
/// per class (`[N]` or `[1, N]`). The top-ranked class wins; anything that
/// does not fit that shape yields [`NOTHING_RECOGNIZED`] rather than an
/// error.
pub struct LabelClassifier {
    session: Arc<Mutex<Box<dyn Session>>>,
    labels: Arc<Vec<String>>,
    profile: ModelProfile,
}

impl LabelClassifier {
    pub fn new(
        backend: &dyn Backend,
        model: ModelSource,
        device: Device,
        profile: ModelProfile,
    ) -> Result<Self, InferError> {
        let session = backend.load_model(model, device)?;
        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            labels: Arc::new(Vec::new()),
            profile,
        })
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Arc::new(labels);
        self
    }

    pub fn profile(&self) -> ModelProfile {
        self.profile
    }

    /// Classify a frame (async). `pixels` is an HWC `Tensor<u8>` with RGB
    /// channels. The forward pass runs on a blocking worker thread.
    pub async fn classify(&self, pixels: &Tensor<u8>) -> Result<String, InferError> {
        let input = preprocess::scale_fill(pixels, self.profile.input_size())?;

        let session = Arc::clone(&self.session);
        let outputs = tokio::task::spawn_blocking(move || {
            let mut session = session.lock().unwrap_or_else(|e| e.into_inner());
            session.run(&[("image", input)])
        })
        .await
        .map_err(|e| InferError::Backend(format!("inference task failed: {e}")))??;

        Ok(self.top_label(outputs.get("scores")))
    }

    fn top_label(&self, scores: Option<&Tensor<f32>>) -> String {
        let Some(scores) = scores else {
            log::warn!("model produced no 'scores' output");
            return NOTHING_RECOGNIZED.to_string();
        };

        let flat: &[f32] = match scores.shape.as_slice() {
            [_n] => &scores.data,
            [1, _n] => &scores.data,
            other => {
                log::warn!("unexpected scores shape {other:?}");
                return NOTHING_RECOGNIZED.to_string();
            }
        };
        if flat.is_empty() {
            return NOTHING_RECOGNIZED.to_string();
        }

        let mut best = 0usize;
        for (idx, value) in flat.iter().enumerate() {
            if *value > flat[best] {
                best = idx;
            }
        }
        self.labels
            .get(best)
            .cloned()
            .unwrap_or_else(|| format!("class {best}"))
    }
}
