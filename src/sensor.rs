use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;

use crate::buffer::SensorBuffer;
use crate::message::Message;

/// A raw event as produced by a sensor before [`Sensor::raw_to_text`] turns
/// it into a [`Message`]. Plugin sensors are loaded by name (see
/// [`crate::registry`]) and therefore exchange raw events as JSON values
/// rather than a per-sensor concrete type.
pub type RawEvent = Value;

/// Every sensor exposes three operations: a cold stream of raw events, a
/// raw-to-text conversion, and a one-shot formatted buffer read.
///
/// Cross-sensor communication must go exclusively through
/// [`crate::providers`] — a `Sensor` must never hold a reference to
/// another sensor.
#[async_trait]
pub trait Sensor: Send {
    /// Human-readable label used to delimit this sensor's prompt block.
    fn descriptor(&self) -> &str;

    /// A cold stream of raw events. Implementations that poll a device or
    /// API call [`poll_loop`] with their own [`Poller`]; push-style
    /// implementations wrap a channel receiver directly.
    fn listen(&mut self) -> BoxStream<'static, RawEvent>;

    /// Convert one raw event into a `Message`, or `None` if the event does
    /// not warrant surfacing. May read cross-sensor state via providers.
    async fn raw_to_text(&mut self, raw: RawEvent) -> Option<Message>;

    /// The sensor's bounded, one-shot buffer.
    fn buffer(&mut self) -> &mut SensorBuffer;

    /// Render the buffer's contents as a prompt block and clear it.
    fn formatted_latest_buffer(&mut self) -> Option<String> {
        self.buffer().formatted_latest_buffer()
    }
}

/// A device or API a [`poll_loop`]-driven sensor polls on a timer.
#[async_trait]
pub trait Poller: Send {
    async fn poll(&mut self) -> Result<RawEvent, crate::error::TransientIo>;
}

/// Default polling implementation: calls `poller.poll()` in a loop, honoring
/// `stop`, and yields each successfully polled event. A poll error is
/// logged and skipped rather than ending the stream, since a flaky device
/// should not silence the sensor for the rest of the run.
pub fn poll_loop(
    mut poller: Box<dyn Poller>,
    stop: crate::stop_signal::StopSignal,
) -> BoxStream<'static, RawEvent> {
    let stream = async_stream::stream! {
        loop {
            if stop.is_stopped() {
                break;
            }
            match poller.poll().await {
                Ok(event) => yield event,
                Err(e) => {
                    tracing::warn!(error = %e, "sensor poll failed");
                }
            }
        }
    };
    Box::pin(stream)
}

/// Wraps a bounded `mpsc::Receiver` as a push-style sensor stream.
///
/// Pushed events must never block the producer; the channel given to
/// `push_stream` should already be bounded with drop-oldest semantics at
/// the call site (see [`crate::providers`]).
pub fn push_stream(mut rx: tokio::sync::mpsc::Receiver<RawEvent>) -> BoxStream<'static, RawEvent> {
    let stream = async_stream::stream! {
        while let Some(event) = rx.recv().await {
            yield event;
        }
    };
    Box::pin(stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct FlakyPoller {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Poller for FlakyPoller {
        async fn poll(&mut self) -> Result<RawEvent, crate::error::TransientIo> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n % 2 == 0 {
                Err(crate::error::TransientIo::Unavailable("flaky".into()))
            } else {
                Ok(Value::String(format!("event-{n}")))
            }
        }
    }

    #[tokio::test]
    async fn poll_loop_skips_errors_and_keeps_polling() {
        let calls = Arc::new(AtomicUsize::new(0));
        let stop = crate::stop_signal::StopSignal::new();
        let mut stream = poll_loop(
            Box::new(FlakyPoller {
                calls: calls.clone(),
            }),
            stop.clone(),
        );
        let first = stream.next().await.unwrap();
        assert_eq!(first, Value::String("event-1".into()));
        stop.stop();
    }

    #[tokio::test]
    async fn push_stream_forwards_events_in_order() {
        let (tx, rx) = tokio::sync::mpsc::channel(4);
        let mut stream = push_stream(rx);
        tx.send(Value::from(1)).await.unwrap();
        tx.send(Value::from(2)).await.unwrap();
        drop(tx);
        assert_eq!(stream.next().await, Some(Value::from(1)));
        assert_eq!(stream.next().await, Some(Value::from(2)));
        assert_eq!(stream.next().await, None);
    }
}
