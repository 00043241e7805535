use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use tokio::sync::Mutex;

use crate::abort_guard::AbortGuard;
use crate::buffer::SensorBuffer;
use crate::io_state::IoState;
use crate::message::{monotonic_seconds, Message};
use crate::sensor::{RawEvent, Sensor};
use crate::stop_signal::StopSignal;

/// All registered sensors, behind one mutex shared by their own ingestion
/// tasks and the Fuser's once-per-tick buffer read. A single mutex rather
/// than one per sensor keeps `Fuser::fuse`'s `&mut [Box<dyn Sensor>]`
/// signature simple; each ingestion task holds the lock only for the
/// instant it takes to start a sensor's stream, swap a sensor out to run
/// its (possibly suspending) `raw_to_text` conversion unlocked, or record
/// one event — never across an `await` on the conversion itself.
pub type SharedSensors = Arc<Mutex<Vec<Box<dyn Sensor>>>>;

/// Stands in for a sensor that's been temporarily swapped out of the
/// shared vec so its `raw_to_text` can run without holding the lock.
/// Never observed doing real work — it sits in the slot only for the
/// duration of one conversion.
struct PlaceholderSensor {
    buffer: SensorBuffer,
}

impl PlaceholderSensor {
    fn new() -> Self {
        Self {
            buffer: SensorBuffer::new("<placeholder>", 1),
        }
    }
}

#[async_trait]
impl Sensor for PlaceholderSensor {
    fn descriptor(&self) -> &str {
        "<placeholder>"
    }

    fn listen(&mut self) -> BoxStream<'static, RawEvent> {
        Box::pin(futures::stream::empty())
    }

    async fn raw_to_text(&mut self, _raw: RawEvent) -> Option<Message> {
        None
    }

    fn buffer(&mut self) -> &mut SensorBuffer {
        &mut self.buffer
    }
}

/// Drives every sensor's `listen()` stream concurrently, converting each
/// raw event to a `Message` and depositing it in the sensor's own buffer
/// and in the shared [`IoState`].
///
/// One failing or panicking sensor task never stops the others — each
/// runs under its own `tokio::spawn`, and a panic surfaces as a logged
/// `JoinError` rather than taking down the orchestrator.
pub struct InputOrchestrator {
    guards: Vec<AbortGuard>,
}

impl InputOrchestrator {
    /// Spawn one ingestion task per sensor index (`sensor_count` must
    /// match `sensors`' current length). Returns immediately; tasks run
    /// until `stop` fires or the orchestrator itself is dropped.
    pub fn spawn(
        sensors: SharedSensors,
        sensor_count: usize,
        io_state: Arc<IoState>,
        stop: StopSignal,
    ) -> Self {
        let mut guards = Vec::new();
        for index in 0..sensor_count {
            let sensors = sensors.clone();
            let io_state = io_state.clone();
            let stop = stop.clone();
            let handle = tokio::spawn(async move {
                listen_to_sensor(sensors, index, io_state, stop).await;
            });
            guards.push(AbortGuard::new(handle));
        }
        Self { guards }
    }

    pub fn task_count(&self) -> usize {
        self.guards.len()
    }
}

async fn listen_to_sensor(sensors: SharedSensors, index: usize, io_state: Arc<IoState>, stop: StopSignal) {
    let (descriptor, mut stream) = {
        let mut guard = sensors.lock().await;
        let sensor = &mut guard[index];
        (sensor.descriptor().to_string(), sensor.listen())
    };
    loop {
        let next = tokio::select! {
            event = stream.next() => event,
            _ = stop.cancelled() => None,
        };
        let Some(raw_event) = next else {
            return;
        };

        // `raw_to_text` is a documented suspension point (it may read
        // Providers or do I/O), so the lock must not be held across it —
        // otherwise one slow sensor's conversion stalls every other
        // sensor's ingestion. Swap the sensor out for a placeholder, run
        // the conversion unlocked, then swap the real sensor back.
        let mut sensor = {
            let mut guard = sensors.lock().await;
            std::mem::replace(&mut guard[index], Box::new(PlaceholderSensor::new()))
        };
        let message = sensor.raw_to_text(raw_event).await;
        if let Some(message) = &message {
            io_state.add_input(&descriptor, message.text.clone(), monotonic_seconds());
        }
        if let Some(message) = message {
            sensor.buffer().push(message);
        }
        {
            let mut guard = sensors.lock().await;
            guard[index] = sensor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::SensorBuffer;
    use crate::message::Message;
    use async_trait::async_trait;
    use futures::stream::BoxStream;
    use std::time::Duration;

    struct OneShotSensor {
        descriptor: String,
        buffer: SensorBuffer,
        events: Vec<serde_json::Value>,
    }

    #[async_trait]
    impl Sensor for OneShotSensor {
        fn descriptor(&self) -> &str {
            &self.descriptor
        }

        fn listen(&mut self) -> BoxStream<'static, crate::sensor::RawEvent> {
            let events = std::mem::take(&mut self.events);
            Box::pin(futures::stream::iter(events))
        }

        async fn raw_to_text(&mut self, raw: crate::sensor::RawEvent) -> Option<Message> {
            Some(Message::new(0.0, raw.as_str().unwrap_or_default()))
        }

        fn buffer(&mut self) -> &mut SensorBuffer {
            &mut self.buffer
        }
    }

    struct FailingSensor {
        descriptor: String,
        buffer: SensorBuffer,
    }

    #[async_trait]
    impl Sensor for FailingSensor {
        fn descriptor(&self) -> &str {
            &self.descriptor
        }

        fn listen(&mut self) -> BoxStream<'static, crate::sensor::RawEvent> {
            Box::pin(async_stream::stream! {
                yield serde_json::json!("trigger");
            })
        }

        async fn raw_to_text(&mut self, _raw: crate::sensor::RawEvent) -> Option<Message> {
            panic!("sensor conversion exploded");
        }

        fn buffer(&mut self) -> &mut SensorBuffer {
            &mut self.buffer
        }
    }

    struct HealthySensor {
        descriptor: String,
        buffer: SensorBuffer,
    }

    #[async_trait]
    impl Sensor for HealthySensor {
        fn descriptor(&self) -> &str {
            &self.descriptor
        }

        fn listen(&mut self) -> BoxStream<'static, crate::sensor::RawEvent> {
            Box::pin(async_stream::stream! {
                yield serde_json::json!("still here");
            })
        }

        async fn raw_to_text(&mut self, raw: crate::sensor::RawEvent) -> Option<Message> {
            Some(Message::new(0.0, raw.as_str().unwrap_or_default()))
        }

        fn buffer(&mut self) -> &mut SensorBuffer {
            &mut self.buffer
        }
    }

    #[tokio::test]
    async fn delivers_events_into_buffer_and_io_state() {
        let sensors: SharedSensors = Arc::new(Mutex::new(vec![Box::new(OneShotSensor {
            descriptor: "eyes".to_string(),
            buffer: SensorBuffer::new("eyes", 8),
            events: vec![serde_json::json!("a face")],
        }) as Box<dyn Sensor>]));
        let io_state = Arc::new(IoState::new());
        let stop = StopSignal::new();
        let orchestrator = InputOrchestrator::spawn(sensors.clone(), 1, io_state.clone(), stop.clone());
        assert_eq!(orchestrator.task_count(), 1);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(io_state.latest_input("eyes").unwrap().text, "a face");
        assert_eq!(
            sensors.lock().await[0].formatted_latest_buffer().as_deref(),
            Some("a face")
        );
        stop.stop();
    }

    struct SlowSensor {
        descriptor: String,
        buffer: SensorBuffer,
        delay: Duration,
    }

    #[async_trait]
    impl Sensor for SlowSensor {
        fn descriptor(&self) -> &str {
            &self.descriptor
        }

        fn listen(&mut self) -> BoxStream<'static, crate::sensor::RawEvent> {
            Box::pin(async_stream::stream! {
                yield serde_json::json!("slow event");
            })
        }

        async fn raw_to_text(&mut self, raw: crate::sensor::RawEvent) -> Option<Message> {
            tokio::time::sleep(self.delay).await;
            Some(Message::new(0.0, raw.as_str().unwrap_or_default()))
        }

        fn buffer(&mut self) -> &mut SensorBuffer {
            &mut self.buffer
        }
    }

    #[tokio::test]
    async fn a_slow_sensor_conversion_does_not_block_other_sensors() {
        let sensors: SharedSensors = Arc::new(Mutex::new(vec![
            Box::new(SlowSensor {
                descriptor: "slow".to_string(),
                buffer: SensorBuffer::new("slow", 8),
                delay: Duration::from_millis(200),
            }) as Box<dyn Sensor>,
            Box::new(HealthySensor {
                descriptor: "ears".to_string(),
                buffer: SensorBuffer::new("ears", 8),
            }) as Box<dyn Sensor>,
        ]));
        let io_state = Arc::new(IoState::new());
        let stop = StopSignal::new();
        let _orchestrator = InputOrchestrator::spawn(sensors.clone(), 2, io_state.clone(), stop.clone());

        // The healthy sensor's event lands well before the slow sensor's
        // 200ms conversion finishes, proving the shared lock isn't held
        // across `raw_to_text`.
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(io_state.latest_input("ears").unwrap().text, "still here");
        assert!(io_state.latest_input("slow").is_none());
        stop.stop();
    }

    #[tokio::test]
    async fn one_sensor_panicking_does_not_stop_the_others() {
        let sensors: SharedSensors = Arc::new(Mutex::new(vec![
            Box::new(FailingSensor {
                descriptor: "broken".to_string(),
                buffer: SensorBuffer::new("broken", 8),
            }) as Box<dyn Sensor>,
            Box::new(HealthySensor {
                descriptor: "ears".to_string(),
                buffer: SensorBuffer::new("ears", 8),
            }) as Box<dyn Sensor>,
        ]));
        let io_state = Arc::new(IoState::new());
        let stop = StopSignal::new();
        let _orchestrator = InputOrchestrator::spawn(sensors.clone(), 2, io_state.clone(), stop.clone());

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(io_state.latest_input("ears").unwrap().text, "still here");
        stop.stop();
    }
}
