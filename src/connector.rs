use std::time::Duration;

use async_trait::async_trait;

use crate::action::Action;
use crate::error::ConnectorError;
use crate::stop_signal::StopSignal;

/// A plugin that carries out one class of action against a real or
/// simulated actuator (speech, motion, an on-screen face, a status LED).
///
/// `connect` is called once per dispatched [`Action`] and must not block
/// longer than the connector's own judgement of a reasonable timeout — the
/// dispatcher does not impose one itself, since what counts as "too slow"
/// is connector-specific (a drive command and a text-to-speech request
/// have very different natural latencies).
///
/// `tick` is an optional periodic hook (status polling, keepalives) driven
/// by the dispatcher at a fixed cadence independent of dispatch traffic.
/// Connectors that have nothing periodic to do simply keep the default.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Registered name this connector answers to (matches `AgentAction::connector`).
    fn name(&self) -> &str;

    async fn connect(&self, action: &Action) -> Result<(), ConnectorError>;

    /// How often `tick` should be called. Defaults to 60 seconds, matching
    /// the teleops status connector's polling period.
    fn tick_interval(&self) -> Duration {
        Duration::from_secs(60)
    }

    /// A periodic no-op by default; connectors with background upkeep
    /// override it.
    async fn tick(&self) -> Result<(), ConnectorError> {
        Ok(())
    }
}

/// Runs `connector.tick()` on its own cadence until `stop` fires, sleeping
/// cooperatively between calls so shutdown is prompt even mid-interval.
pub async fn run_tick_loop(connector: &dyn Connector, stop: StopSignal) {
    loop {
        if stop.is_stopped() {
            return;
        }
        if let Err(e) = connector.tick().await {
            tracing::warn!(connector = connector.name(), error = %e, "connector tick failed");
        }
        if !stop.sleep(connector.tick_interval()).await {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingConnector {
        ticks: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Connector for CountingConnector {
        fn name(&self) -> &str {
            "counting"
        }

        async fn connect(&self, _action: &Action) -> Result<(), ConnectorError> {
            Ok(())
        }

        fn tick_interval(&self) -> Duration {
            Duration::from_millis(5)
        }

        async fn tick(&self) -> Result<(), ConnectorError> {
            self.ticks.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn tick_loop_stops_promptly_when_signalled() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let connector = CountingConnector {
            ticks: ticks.clone(),
        };
        let stop = StopSignal::new();
        let stop_for_task = stop.clone();
        let handle = tokio::spawn(async move {
            run_tick_loop(&connector, stop_for_task).await;
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(ticks.load(Ordering::SeqCst) > 0);
        stop.stop();
        let result = tokio::time::timeout(Duration::from_millis(200), handle).await;
        assert!(result.is_ok());
    }
}
