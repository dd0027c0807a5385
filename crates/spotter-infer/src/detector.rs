use crate::{preprocess, Backend, Detection, Device, InferError, ModelProfile, ModelSource, Session};
use spotter_base::{Rect, Tensor, Vec2};
use std::sync::{Arc, Mutex};

/// Detection-mode front-end: one frame in, labeled boxes out.
///
/// The loaded session is expected to produce a `"detections"` output of
/// shape `[N, 6]`, one row per object: normalized origin x, origin y,
/// width, height, confidence, class index. A missing or malformed output
/// is treated as "nothing recognized" (empty result), not as a failure.
pub struct Detector {
    session: Arc<Mutex<Box<dyn Session>>>,
    labels: Arc<Vec<String>>,
    profile: ModelProfile,
    conf_threshold: f32,
    nms_threshold: f32,
}

impl Detector {
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
            conf_threshold: 0.25,
            nms_threshold: 0.45,
        })
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Arc::new(labels);
        self
    }

    /// Set confidence and NMS thresholds
    pub fn with_thresholds(mut self, conf: f32, nms: f32) -> Self {
        self.conf_threshold = conf;
        self.nms_threshold = nms;
        self
    }

    pub fn profile(&self) -> ModelProfile {
        self.profile
    }

    /// Run detection on a frame (async).
    ///
    /// `pixels` is an HWC `Tensor<u8>` with RGB channels. The forward pass
    /// runs on a blocking worker thread; preprocessing and postprocessing
    /// stay inline.
    pub async fn detect(&self, pixels: &Tensor<u8>) -> Result<Vec<Detection>, InferError> {
        let input = preprocess::scale_fill(pixels, self.profile.input_size())?;

        let session = Arc::clone(&self.session);
        let outputs = tokio::task::spawn_blocking(move || {
            let mut session = session.lock().unwrap_or_else(|e| e.into_inner());
            session.run(&[("image", input)])
        })
        .await
        .map_err(|e| InferError::Backend(format!("inference task failed: {e}")))??;

        let Some(raw) = outputs.get("detections") else {
            log::warn!("model produced no 'detections' output; treating as empty");
            return Ok(Vec::new());
        };

        Ok(self.postprocess(raw))
    }

    fn postprocess(&self, raw: &Tensor<f32>) -> Vec<Detection> {
        if raw.shape.len() != 2 || raw.shape[1] != 6 {
            log::warn!(
                "unexpected detections shape {:?}; treating as empty",
                raw.shape
            );
            return Vec::new();
        }

        let mut candidates: Vec<Detection> = raw
            .data
            .chunks_exact(6)
            .filter(|row| row[4] >= self.conf_threshold)
            .map(|row| {
                let bounds = Rect::new(Vec2::new(row[0], row[1]), Vec2::new(row[2], row[3]))
                    .clamp_unit();
                let class = row[5] as usize;
                let label = self
                    .labels
                    .get(class)
                    .cloned()
                    .unwrap_or_else(|| format!("class {class}"));
                Detection {
                    label,
                    bounds,
                    confidence: row[4],
                }
            })
            .collect();

        // Greedy NMS, highest confidence first.
        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let mut kept: Vec<Detection> = Vec::new();
        for candidate in candidates {
            if kept
                .iter()
                .all(|k| k.bounds.iou(candidate.bounds) <= self.nms_threshold)
            {
                kept.push(candidate);
            }
        }
        kept
    }
}
