use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::abort_guard::AbortGuard;
use crate::stop_signal::StopSignal;

/// Push-style Provider: holds a bounded inbound queue (drop-oldest once
/// full) and a worker that forwards each item to an external transport —
/// here, any closure the caller supplies, standing in for the concrete
/// text-to-speech transport a real deployment would plug in.
pub struct TtsQueueProvider {
    queue: Arc<Mutex<VecDeque<String>>>,
    capacity: usize,
    notify: Arc<Notify>,
    _guard: AbortGuard,
}

impl TtsQueueProvider {
    /// `forward` is called once per queued message, in order, by the
    /// provider's own worker task.
    pub fn start<F>(capacity: usize, stop: StopSignal, mut forward: F) -> Self
    where
        F: FnMut(String) + Send + 'static,
    {
        let capacity = capacity.max(1);
        let queue: Arc<Mutex<VecDeque<String>>> = Arc::new(Mutex::new(VecDeque::new()));
        let notify = Arc::new(Notify::new());

        let worker_queue = queue.clone();
        let worker_notify = notify.clone();
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = worker_notify.notified() => {}
                    _ = stop.cancelled() => return,
                }
                while let Some(msg) = worker_queue.lock().unwrap().pop_front() {
                    forward(msg);
                    if stop.is_stopped() {
                        return;
                    }
                }
            }
        });

        Self {
            queue,
            capacity,
            notify,
            _guard: AbortGuard::new(handle),
        }
    }

    /// Enqueue a message, dropping the oldest queued message (and logging)
    /// if the queue is already at capacity rather than blocking the
    /// caller — a push-style Provider must never apply backpressure, and
    /// speaking the newest thing matters more than replaying stale speech.
    pub fn add_pending_message(&self, text: impl Into<String>) {
        let mut queue = self.queue.lock().unwrap();
        if queue.len() >= self.capacity {
            queue.pop_front();
            tracing::warn!("tts queue full; dropping oldest message");
        }
        queue.push_back(text.into());
        drop(queue);
        self.notify.notify_one();
    }
}
