use std::sync::RwLock;

use async_trait::async_trait;

use crate::abort_guard::AbortGuard;
use crate::stop_signal::StopSignal;

/// A device or network topic an [`IngestProvider`] polls on its own
/// background worker — GPS fix, lidar scan, odometry, battery level, a
/// face-presence flag.
#[async_trait]
pub trait IngestSource<T>: Send {
    /// Block until the next snapshot is available, or return an error the
    /// worker logs and retries after.
    async fn next_snapshot(&mut self) -> Result<T, crate::error::TransientIo>;
}

/// Ingest-style Provider: owns a background task that listens to a device
/// or network topic and exposes the current snapshot as a plain getter.
///
/// `T` is the snapshot type (a pose, a battery percentage, a boolean).
/// Writers never touch `current` directly — only the worker started by
/// `start` does.
pub struct IngestProvider<T> {
    current: std::sync::Arc<RwLock<Option<T>>>,
    guard: Option<AbortGuard>,
}

impl<T: Clone + Send + Sync + 'static> IngestProvider<T> {
    pub fn new() -> Self {
        Self {
            current: std::sync::Arc::new(RwLock::new(None)),
            guard: None,
        }
    }

    /// Idempotent: calling `start` again while already running is a no-op.
    pub fn start(&mut self, mut source: Box<dyn IngestSource<T>>, stop: StopSignal) {
        if self.guard.is_some() {
            return;
        }
        let current = self.current.clone();
        let handle = tokio::spawn(async move {
            loop {
                if stop.is_stopped() {
                    return;
                }
                match source.next_snapshot().await {
                    Ok(snapshot) => {
                        *current.write().unwrap() = Some(snapshot);
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "ingest source read failed");
                    }
                }
            }
        });
        self.guard = Some(AbortGuard::new(handle));
    }

    pub fn stop(&mut self) {
        self.guard = None;
    }

    pub fn current(&self) -> Option<T> {
        self.current.read().unwrap().clone()
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn reset(&mut self) {
        self.stop();
        *self.current.write().unwrap() = None;
    }
}

impl<T: Clone + Send + Sync + 'static> Default for IngestProvider<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl IngestSource<u32> for CountingSource {
        async fn next_snapshot(&mut self) -> Result<u32, crate::error::TransientIo> {
            tokio::time::sleep(Duration::from_millis(5)).await;
            Ok(self.calls.fetch_add(1, Ordering::SeqCst) as u32)
        }
    }

    #[tokio::test]
    async fn exposes_latest_snapshot() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut provider: IngestProvider<u32> = IngestProvider::new();
        assert!(provider.current().is_none());

        let stop = StopSignal::new();
        provider.start(Box::new(CountingSource { calls }), stop.clone());
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(provider.current().is_some());
        stop.stop();
    }

    #[tokio::test]
    async fn starting_twice_is_idempotent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut provider: IngestProvider<u32> = IngestProvider::new();
        let stop = StopSignal::new();
        provider.start(
            Box::new(CountingSource {
                calls: calls.clone(),
            }),
            stop.clone(),
        );
        provider.start(Box::new(CountingSource { calls }), stop.clone());
        stop.stop();
    }
}
