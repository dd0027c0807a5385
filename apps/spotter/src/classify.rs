use crate::state::{Snapshot, StateHandle, StateUpdate};
use spotter_camera::Frame;
use spotter_infer::{
    Backend, Detector, Device, HeuristicBackend, Invoker, LabelClassifier, ModelProfile,
    ModelSource,
};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Detection,
    Classification,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Detection => Mode::Classification,
            Mode::Classification => Mode::Detection,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Detection => write!(f, "detection"),
            Mode::Classification => write!(f, "classification"),
        }
    }
}

/// Everything one classification run needs, captured at trigger time.
///
/// The model loads per invocation (a load failure aborts just that run),
/// so switching profile or mode between triggers needs no shared setup.
#[derive(Clone, Debug)]
pub struct ClassifyConfig {
    pub mode: Mode,
    pub profile: ModelProfile,
    pub fast_model: Option<PathBuf>,
    pub accurate_model: Option<PathBuf>,
    pub labels: Vec<String>,
}

impl ClassifyConfig {
    fn model_path(&self) -> Option<&PathBuf> {
        match self.profile {
            ModelProfile::Fast => self.fast_model.as_ref(),
            ModelProfile::Accurate => self.accurate_model.as_ref(),
        }
    }

    /// Pick the backend and weights for this run. A configured model file
    /// selects the onnx backend; otherwise the deterministic heuristic
    /// stands in.
    fn backend_and_source(&self) -> (Box<dyn Backend>, ModelSource) {
        #[cfg(feature = "onnx")]
        if let Some(path) = self.model_path() {
            return (
                Box::new(spotter_infer::OnnxBackend::new()),
                ModelSource::File(path.clone()),
            );
        }
        #[cfg(not(feature = "onnx"))]
        if self.model_path().is_some() {
            log::warn!("built without the onnx feature; using heuristic backend");
        }
        (Box::new(HeuristicBackend::new()), ModelSource::Builtin)
    }

    fn build_detector(&self) -> Result<Detector, spotter_infer::InferError> {
        let (backend, source) = self.backend_and_source();
        Ok(
            Detector::new(backend.as_ref(), source, Device::Cpu, self.profile)?
                .with_labels(self.labels.clone()),
        )
    }

    fn build_classifier(&self) -> Result<LabelClassifier, spotter_infer::InferError> {
        let (backend, source) = self.backend_and_source();
        Ok(
            LabelClassifier::new(backend.as_ref(), source, Device::Cpu, self.profile)?
                .with_labels(self.labels.clone()),
        )
    }

    /// Run one classification and report the outcome, or `None` when the
    /// run failed. Failures are logged here and mutate nothing.
    pub async fn run_once(&self, frame: &Frame) -> Option<StateUpdate> {
        match self.mode {
            Mode::Detection => {
                let detector = match self.build_detector() {
                    Ok(detector) => detector,
                    Err(err) => {
                        log::error!("failed to load {} model: {err}", self.profile);
                        return None;
                    }
                };
                match detector.detect(frame.pixels()).await {
                    Ok(detections) => Some(StateUpdate::Detections(detections)),
                    Err(err) => {
                        log::error!("detection failed: {err}");
                        None
                    }
                }
            }
            Mode::Classification => {
                let classifier = match self.build_classifier() {
                    Ok(classifier) => classifier,
                    Err(err) => {
                        log::error!("failed to load {} model: {err}", self.profile);
                        return None;
                    }
                };
                match classifier.classify(frame.pixels()).await {
                    Ok(label) => Some(StateUpdate::Label(label)),
                    Err(err) => {
                        log::error!("classification failed: {err}");
                        None
                    }
                }
            }
        }
    }
}

/// Handle one user trigger against the current snapshot.
///
/// No frame yet means no model invocation at all: log and leave the
/// previous overlay untouched. Otherwise dispatch through the invoker,
/// which aborts any still-running predecessor (cancel-and-replace).
pub fn trigger(
    invoker: &mut Invoker,
    config: ClassifyConfig,
    state: StateHandle,
    snapshot: &Snapshot,
) {
    let Some(frame) = snapshot.frame.clone() else {
        log::info!("no frame available for classification yet");
        return;
    };

    log::info!(
        "classifying frame seq={} ({} mode, {} profile)",
        frame.seq(),
        config.mode,
        config.profile
    );
    invoker.dispatch(async move {
        if let Some(update) = config.run_once(&frame).await {
            state.send(update).await;
        }
    });
}
