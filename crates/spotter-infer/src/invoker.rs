use std::future::Future;
use tokio::task::JoinHandle;

/// One-shot invocation guard with a cancel-and-replace policy.
///
/// Each user trigger becomes one spawned task. Triggering again while a run
/// is still in flight aborts the old run before dispatching the new one, so
/// at most one invocation can ever write its result: no interleaved or torn
/// updates from overlapping triggers.
pub struct Invoker {
    current: Option<JoinHandle<()>>,
}

impl Invoker {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Dispatch an invocation, aborting any still-running predecessor.
    pub fn dispatch<F>(&mut self, invocation: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(previous) = self.current.take() {
            if !previous.is_finished() {
                log::debug!("superseding in-flight classification");
                previous.abort();
            }
        }
        self.current = Some(tokio::spawn(invocation));
    }

    /// Wait for the current invocation to finish (or be aborted). Used by
    /// shutdown and by tests; triggers themselves never wait.
    pub async fn join(&mut self) {
        if let Some(handle) = self.current.take() {
            let _ = handle.await;
        }
    }

    pub fn is_busy(&self) -> bool {
        self.current.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Default for Invoker {
    fn default() -> Self {
        Self::new()
    }
}
