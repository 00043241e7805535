use std::collections::HashMap;
use std::sync::RwLock;

/// Pull-style Provider: a plain in-memory key/value map read by many
/// components (the "greeting finished" flag, the last known location
/// label, arbitrary per-deployment flags). No background worker — reads
/// and writes are synchronous and immediate.
#[derive(Default)]
pub struct ContextProvider {
    values: RwLock<HashMap<String, String>>,
}

impl ContextProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.values.write().unwrap().insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().unwrap().get(key).cloned()
    }

    pub fn clear(&self, key: &str) {
        self.values.write().unwrap().remove(key);
    }

    /// Test-only: drop all state, as if freshly constructed.
    #[cfg(any(test, feature = "test-support"))]
    pub fn reset(&self) {
        self.values.write().unwrap().clear();
    }
}
