use std::collections::VecDeque;

use crate::message::Message;

/// Per-sensor ordered bounded queue of [`Message`]s plus the sensor's
/// human-readable descriptor, used to delimit its prompt block.
///
/// Enqueue is drop-oldest once `capacity` is reached — the spec's typical
/// bound is 50-300 entries; callers pick the number that fits their
/// sensor's event rate.
///
/// `formatted_latest_buffer` is the sensor's "one-shot" contract: reading
/// it renders the most recent message(s) into a prompt block *and empties
/// the buffer*, so a tick never sees the same input twice.
pub struct SensorBuffer {
    descriptor: String,
    capacity: usize,
    messages: VecDeque<Message>,
}

impl SensorBuffer {
    pub fn new(descriptor: impl Into<String>, capacity: usize) -> Self {
        Self {
            descriptor: descriptor.into(),
            capacity: capacity.max(1),
            messages: VecDeque::new(),
        }
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Push a new message, dropping the oldest entry if the buffer is full.
    pub fn push(&mut self, message: Message) {
        if self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Render the buffer's contents as a single prompt block and clear it.
    ///
    /// Returns `None` ("no block") when the buffer is empty, so the Fuser
    /// never emits empty delimiters for a quiet sensor.
    pub fn formatted_latest_buffer(&mut self) -> Option<String> {
        if self.messages.is_empty() {
            return None;
        }
        let rendered = self
            .messages
            .iter()
            .map(|m| m.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        self.messages.clear();
        Some(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_yields_no_block() {
        let mut buf = SensorBuffer::new("eyes", 4);
        assert!(buf.formatted_latest_buffer().is_none());
    }

    #[test]
    fn reading_the_buffer_clears_it() {
        let mut buf = SensorBuffer::new("eyes", 4);
        buf.push(Message::new(0.0, "hello"));
        assert_eq!(buf.formatted_latest_buffer().as_deref(), Some("hello"));
        assert!(buf.is_empty());
        assert!(buf.formatted_latest_buffer().is_none());
    }

    #[test]
    fn drops_oldest_past_capacity() {
        let mut buf = SensorBuffer::new("eyes", 2);
        buf.push(Message::new(0.0, "a"));
        buf.push(Message::new(1.0, "b"));
        buf.push(Message::new(2.0, "c"));
        assert_eq!(buf.formatted_latest_buffer().as_deref(), Some("b\nc"));
    }
}
