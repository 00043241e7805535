use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use crate::message::Message;

/// Process-wide thread-safe registry the Fuser and any plugin can read
/// from or write to.
///
/// Holds the latest `Message` per sensor class name, a dynamic-variable
/// map (e.g. latitude, longitude, yaw), and the fuser/LLM timing marks and
/// prompt snapshots used for diagnostics. Created at process start,
/// destroyed at shutdown; never persisted.
#[derive(Default)]
pub struct IoState {
    latest_input: RwLock<HashMap<String, Message>>,
    dynamic_variables: RwLock<HashMap<String, String>>,
    timings: Mutex<Timings>,
}

#[derive(Default, Clone)]
struct Timings {
    fuser_start_time: Option<f64>,
    fuser_end_time: Option<f64>,
    fuser_system_prompt: Option<String>,
    fuser_inputs: Option<String>,
    fuser_available_actions: Option<String>,
    llm_start_time: Option<f64>,
    llm_end_time: Option<f64>,
}

impl IoState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest message seen from `sensor_name`.
    pub fn add_input(&self, sensor_name: &str, text: impl Into<String>, timestamp: f64) {
        self.latest_input
            .write()
            .unwrap()
            .insert(sensor_name.to_string(), Message::new(timestamp, text.into()));
    }

    pub fn latest_input(&self, sensor_name: &str) -> Option<Message> {
        self.latest_input.read().unwrap().get(sensor_name).cloned()
    }

    /// Last-writer-wins: whichever thread calls this last determines the
    /// value a subsequent `get_dynamic_variable` observes.
    pub fn add_dynamic_variable(&self, key: impl Into<String>, value: impl Into<String>) {
        self.dynamic_variables
            .write()
            .unwrap()
            .insert(key.into(), value.into());
    }

    pub fn get_dynamic_variable(&self, key: &str) -> Option<String> {
        self.dynamic_variables.read().unwrap().get(key).cloned()
    }

    pub fn mark_fuser_start(&self, timestamp: f64) {
        self.timings.lock().unwrap().fuser_start_time = Some(timestamp);
    }

    pub fn mark_fuser_end(&self, timestamp: f64) {
        self.timings.lock().unwrap().fuser_end_time = Some(timestamp);
    }

    pub fn record_fuser_output(&self, system_prompt: &str, inputs: &str, available_actions: &str) {
        let mut t = self.timings.lock().unwrap();
        t.fuser_system_prompt = Some(system_prompt.to_string());
        t.fuser_inputs = Some(inputs.to_string());
        t.fuser_available_actions = Some(available_actions.to_string());
    }

    pub fn mark_llm_start(&self, timestamp: f64) {
        self.timings.lock().unwrap().llm_start_time = Some(timestamp);
    }

    pub fn mark_llm_end(&self, timestamp: f64) {
        self.timings.lock().unwrap().llm_end_time = Some(timestamp);
    }

    pub fn fuser_start_time(&self) -> Option<f64> {
        self.timings.lock().unwrap().fuser_start_time
    }

    pub fn fuser_end_time(&self) -> Option<f64> {
        self.timings.lock().unwrap().fuser_end_time
    }

    pub fn llm_start_time(&self) -> Option<f64> {
        self.timings.lock().unwrap().llm_start_time
    }

    pub fn llm_end_time(&self) -> Option<f64> {
        self.timings.lock().unwrap().llm_end_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn dynamic_variable_is_last_writer_wins() {
        let state = Arc::new(IoState::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let state = state.clone();
            handles.push(thread::spawn(move || {
                state.add_dynamic_variable("yaw", i.to_string());
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        let got: i32 = state.get_dynamic_variable("yaw").unwrap().parse().unwrap();
        assert!((0..8).contains(&got));
    }

    #[test]
    fn latest_input_round_trips() {
        let state = IoState::new();
        state.add_input("eyes", "a face", 1.0);
        let msg = state.latest_input("eyes").unwrap();
        assert_eq!(msg.text, "a face");
        assert_eq!(msg.timestamp, 1.0);
    }
}
