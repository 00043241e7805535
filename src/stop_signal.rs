use std::time::Duration;

use tokio::sync::watch;

/// Broadcast-capable cancellation primitive shared by every background
/// worker, connector `tick()`, and sensor poll loop.
///
/// Cloning a [`StopSignal`] shares the same underlying flag; calling
/// [`StopSignal::stop`] on any clone wakes every cooperative `sleep` across
/// all of them.
#[derive(Clone)]
pub struct StopSignal {
    tx: watch::Sender<bool>,
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx, rx }
    }

    /// Broadcast shutdown. Idempotent.
    pub fn stop(&self) {
        let _ = self.tx.send(true);
    }

    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }

    /// Cooperative sleep bound to this signal.
    ///
    /// Returns `true` after at least `duration` elapses undisturbed, or
    /// `false` as soon as [`StopSignal::stop`] is called, whether that
    /// happens before the call or mid-sleep.
    pub async fn sleep(&self, duration: Duration) -> bool {
        if self.is_stopped() {
            return false;
        }
        let mut rx = self.rx.clone();
        tokio::select! {
            _ = tokio::time::sleep(duration) => true,
            res = rx.changed() => {
                match res {
                    Ok(()) => !*rx.borrow(),
                    Err(_) => true,
                }
            }
        }
    }

    /// Wait for `stop()` to be called, returning immediately if it already
    /// has been.
    pub async fn cancelled(&self) {
        if self.is_stopped() {
            return;
        }
        let mut rx = self.rx.clone();
        while rx.changed().await.is_ok() {
            if *rx.borrow() {
                return;
            }
        }
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn sleep_completes_when_not_stopped() {
        let signal = StopSignal::new();
        let start = Instant::now();
        assert!(signal.sleep(Duration::from_millis(30)).await);
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn sleep_is_interrupted_by_stop() {
        let signal = StopSignal::new();
        let waiter = signal.clone();
        let handle = tokio::spawn(async move { waiter.sleep(Duration::from_secs(10)).await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        let start = Instant::now();
        signal.stop();
        let woke = handle.await.unwrap();
        assert!(!woke);
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn sleep_returns_false_immediately_if_already_stopped() {
        let signal = StopSignal::new();
        signal.stop();
        let start = Instant::now();
        assert!(!signal.sleep(Duration::from_secs(5)).await);
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
