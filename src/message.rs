/// A single timestamped observation produced by a sensor.
///
/// `timestamp` is a monotonic float number of seconds, matching the clock
/// a sensor was created against; it is not wall-clock time and is only
/// ever compared to other timestamps from the same sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub timestamp: f64,
    pub text: String,
}

impl Message {
    pub fn new(timestamp: f64, text: impl Into<String>) -> Self {
        Self {
            timestamp,
            text: text.into(),
        }
    }

    /// A `Message` timestamped with the current monotonic clock.
    pub fn now(text: impl Into<String>) -> Self {
        Self::new(monotonic_seconds(), text)
    }
}

/// Seconds since an arbitrary but fixed epoch, suitable only for ordering
/// and elapsed-time arithmetic within a single process.
pub fn monotonic_seconds() -> f64 {
    use once_cell::sync::Lazy;
    use std::time::Instant;
    static START: Lazy<Instant> = Lazy::new(Instant::now);
    START.elapsed().as_secs_f64()
}
