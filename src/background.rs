use std::time::Duration;

use async_trait::async_trait;

use crate::stop_signal::StopSignal;

/// A long-lived plugin with no request/response shape of its own — a
/// periodic status report, a watchdog, a simulator's own clock.
///
/// `run` is called once per cadence by [`run_background`]; tasks that have
/// nothing periodic to do (most of them merely instantiate a provider in
/// their constructor and let the provider's own worker carry on) simply
/// keep the default no-op.
#[async_trait]
pub trait BackgroundTask: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self) {}

    /// Cadence between `run` calls. Defaults to 60 seconds.
    fn interval(&self) -> Duration {
        Duration::from_secs(60)
    }
}

/// Drives one [`BackgroundTask`] on its own cadence until `stop` fires.
pub async fn run_background(task: &dyn BackgroundTask, stop: StopSignal) {
    loop {
        if stop.is_stopped() {
            return;
        }
        task.run().await;
        if !stop.sleep(task.interval()).await {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingTask {
        runs: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl BackgroundTask for CountingTask {
        fn name(&self) -> &str {
            "counting"
        }

        async fn run(&self) {
            self.runs.fetch_add(1, Ordering::SeqCst);
        }

        fn interval(&self) -> Duration {
            Duration::from_millis(5)
        }
    }

    #[tokio::test]
    async fn runs_repeatedly_until_stopped() {
        let runs = Arc::new(AtomicUsize::new(0));
        let task = CountingTask { runs: runs.clone() };
        let stop = StopSignal::new();
        let stop_for_task = stop.clone();
        let handle = tokio::spawn(async move {
            run_background(&task, stop_for_task).await;
        });
        tokio::time::sleep(Duration::from_millis(30)).await;
        stop.stop();
        let _ = tokio::time::timeout(Duration::from_millis(200), handle).await;
        assert!(runs.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn default_run_is_a_noop() {
        struct SilentTask;
        #[async_trait]
        impl BackgroundTask for SilentTask {
            fn name(&self) -> &str {
                "silent"
            }
        }
        let task = SilentTask;
        task.run().await;
    }
}
