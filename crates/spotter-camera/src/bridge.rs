use crate::Frame;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Create a bounded, single-subscriber frame channel.
///
/// The sender side is synchronous and never blocks: a capture thread calls
/// `push` from its own loop. When the queue is full the oldest queued frame
/// is evicted to make room, so a stalled consumer resumes at the freshest
/// frames rather than replaying a backlog. The receiver side is async;
/// `next()` resolves `None` once the sender is gone and the queue is drained.
///
/// `capacity` must be at least 1.
pub fn frame_bridge(capacity: usize) -> (FrameSender, FrameStream) {
    assert!(capacity >= 1, "frame bridge capacity must be at least 1");
    let shared = Arc::new(Shared {
        queue: Mutex::new(VecDeque::with_capacity(capacity)),
        capacity,
        notify: Notify::new(),
        sender_gone: AtomicBool::new(false),
        receiver_gone: AtomicBool::new(false),
    });
    (
        FrameSender {
            shared: shared.clone(),
        },
        FrameStream { shared },
    )
}

struct Shared {
    queue: Mutex<VecDeque<Frame>>,
    capacity: usize,
    notify: Notify,
    sender_gone: AtomicBool,
    receiver_gone: AtomicBool,
}

/// Producer half of the bridge. One per capture source.
pub struct FrameSender {
    shared: Arc<Shared>,
}

impl FrameSender {
    /// Queue a frame for the subscriber without blocking.
    ///
    /// Returns `false` once the subscriber is gone; the capture loop should
    /// stop producing at that point.
    pub fn push(&self, frame: Frame) -> bool {
        if self.shared.receiver_gone.load(Ordering::Acquire) {
            return false;
        }
        {
            let mut queue = self.shared.queue.lock().unwrap_or_else(|e| e.into_inner());
            if queue.len() == self.shared.capacity {
                if let Some(evicted) = queue.pop_front() {
                    log::debug!("frame bridge full; dropping oldest frame seq={}", evicted.seq());
                }
            }
            queue.push_back(frame);
        }
        self.shared.notify.notify_one();
        true
    }
}

impl Drop for FrameSender {
    fn drop(&mut self) {
        self.shared.sender_gone.store(true, Ordering::Release);
        self.shared.notify.notify_one();
    }
}

/// Subscriber half of the bridge. Deliberately not `Clone`: the contract is
/// exactly one consumer context, consuming in capture order.
pub struct FrameStream {
    shared: Arc<Shared>,
}

impl FrameStream {
    /// Await the next frame. `None` means the producer is gone and every
    /// queued frame has been delivered; the stream will never yield again.
    pub async fn next(&mut self) -> Option<Frame> {
        loop {
            if let Some(frame) = self.pop() {
                return Some(frame);
            }
            if self.shared.sender_gone.load(Ordering::Acquire) {
                // Drain anything that raced in between the pop and the check.
                return self.pop();
            }
            self.shared.notify.notified().await;
        }
    }

    /// Take the next frame if one is already queued.
    pub fn try_next(&mut self) -> Option<Frame> {
        self.pop()
    }

    fn pop(&self) -> Option<Frame> {
        let mut queue = self.shared.queue.lock().unwrap_or_else(|e| e.into_inner());
        queue.pop_front()
    }
}

impl Drop for FrameStream {
    fn drop(&mut self) {
        self.shared.receiver_gone.store(true, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotter_base::Tensor;

    fn frame(seq: u64) -> Frame {
        Frame::new(Tensor::zeros(vec![2, 2, 3]).unwrap(), seq)
    }

    #[tokio::test]
    async fn test_delivers_in_order() {
        let (tx, mut rx) = frame_bridge(8);
        for seq in 0..5 {
            assert!(tx.push(frame(seq)));
        }
        for seq in 0..5 {
            assert_eq!(rx.next().await.unwrap().seq(), seq);
        }
    }

    #[tokio::test]
    async fn test_drop_oldest_when_full() {
        let (tx, mut rx) = frame_bridge(3);
        for seq in 0..7 {
            tx.push(frame(seq));
        }
        // Capacity 3: only the last three survive, still in order.
        assert_eq!(rx.next().await.unwrap().seq(), 4);
        assert_eq!(rx.next().await.unwrap().seq(), 5);
        assert_eq!(rx.next().await.unwrap().seq(), 6);
    }

    #[tokio::test]
    async fn test_none_after_sender_dropped() {
        let (tx, mut rx) = frame_bridge(4);
        tx.push(frame(0));
        drop(tx);
        assert_eq!(rx.next().await.unwrap().seq(), 0);
        assert!(rx.next().await.is_none());
    }

    #[tokio::test]
    async fn test_none_when_never_produced() {
        let (tx, mut rx) = frame_bridge(4);
        drop(tx);
        assert!(rx.next().await.is_none());
    }

    #[tokio::test]
    async fn test_push_reports_receiver_gone() {
        let (tx, rx) = frame_bridge(4);
        drop(rx);
        assert!(!tx.push(frame(0)));
    }

    #[tokio::test]
    async fn test_wakes_blocked_consumer() {
        let (tx, mut rx) = frame_bridge(4);
        let consumer = tokio::spawn(async move { rx.next().await.map(|f| f.seq()) });
        // Give the consumer a chance to park on the notify.
        tokio::task::yield_now().await;
        tx.push(frame(42));
        assert_eq!(consumer.await.unwrap(), Some(42));
    }
}
