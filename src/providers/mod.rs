//! Process-wide shared-state singletons mediating cross-plugin
//! communication. Sensors, connectors, and backgrounds never hold a
//! reference to one another — all cross-component reads and writes go
//! through a Provider.
//!
//! Three families, distinguished by how data gets in:
//!
//! - [`context::ContextProvider`] — pull-style: an in-memory key/value map.
//! - [`tts_queue::TtsQueueProvider`] — push-style: a bounded inbound queue
//!   drained by a forwarding worker.
//! - [`ingest::IngestProvider`] — ingest-style: owns a background task that
//!   listens to a device/topic and exposes the latest snapshot.

pub mod context;
pub mod ingest;
pub mod tts_queue;

pub use context::ContextProvider;
pub use ingest::IngestProvider;
pub use tts_queue::TtsQueueProvider;
