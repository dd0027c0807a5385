use spotter_camera::Frame;
use spotter_infer::Detection;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// The current classification result, if any.
///
/// Each classification run fully replaces the overlay; frame updates never
/// touch it. `Detections(vec![])` is a real outcome ("the model ran and saw
/// nothing"), distinct from `None` ("no run yet").
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Overlay {
    #[default]
    None,
    Detections(Vec<Detection>),
    Label(String),
}

/// What the renderer sees: the latest frame plus the latest overlay.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub frame: Option<Frame>,
    pub overlay: Overlay,
}

#[derive(Debug)]
pub enum StateUpdate {
    Frame(Frame),
    Detections(Vec<Detection>),
    Label(String),
}

/// Write half of the presentation state. Cloneable; every holder's updates
/// funnel into the same single-writer task.
#[derive(Clone)]
pub struct StateHandle {
    tx: mpsc::Sender<StateUpdate>,
}

impl StateHandle {
    pub async fn send(&self, update: StateUpdate) {
        // The state task outlives its writers in normal operation; if it is
        // gone we are shutting down and the update has nowhere to go.
        let _ = self.tx.send(update).await;
    }
}

/// Presentation state: one task owns the mutable snapshot, applies updates
/// in arrival order, and publishes each new snapshot through a watch
/// channel. Readers never touch the state itself.
///
/// Constructed explicitly in `main` and handed to whoever needs a handle;
/// there is no global.
pub struct Presentation {
    tx: mpsc::Sender<StateUpdate>,
    snapshot_rx: watch::Receiver<Snapshot>,
    task: JoinHandle<()>,
}

impl Presentation {
    pub fn spawn() -> Self {
        let (tx, mut rx) = mpsc::channel::<StateUpdate>(16);
        let (snapshot_tx, snapshot_rx) = watch::channel(Snapshot::default());

        let task = tokio::spawn(async move {
            let mut current = Snapshot::default();
            while let Some(update) = rx.recv().await {
                match update {
                    StateUpdate::Frame(frame) => current.frame = Some(frame),
                    StateUpdate::Detections(detections) => {
                        current.overlay = Overlay::Detections(detections);
                    }
                    StateUpdate::Label(label) => current.overlay = Overlay::Label(label),
                }
                if snapshot_tx.send(current.clone()).is_err() {
                    break;
                }
            }
        });

        Self {
            tx,
            snapshot_rx,
            task,
        }
    }

    pub fn handle(&self) -> StateHandle {
        StateHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_rx.clone()
    }

    /// The latest published snapshot.
    pub fn current(&self) -> Snapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Stop accepting updates and wait for the state task to drain.
    pub async fn shutdown(self) {
        drop(self.tx);
        let _ = self.task.await;
    }
}
