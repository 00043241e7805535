//! Core runtime for fusing sensor streams into a single prompt per tick,
//! dispatching the LLM's chosen action to the right connector, and
//! running background tasks and shared-state Providers alongside it.

mod abort_guard;
mod action;
mod background;
mod buffer;
pub mod config;
mod connector;
mod dispatcher;
pub mod error;
mod fuser;
pub mod llm;
mod io_state;
mod message;
mod orchestrator;
pub mod providers;
mod registry;
mod runtime;
mod sensor;
pub mod state_machine;
mod stop_signal;
pub mod wire;

pub use abort_guard::AbortGuard;
pub use action::{Action, ActionInterface, AgentAction, ValueType};
pub use background::{run_background, BackgroundTask};
pub use buffer::SensorBuffer;
pub use config::RuntimeConfig;
pub use connector::{run_tick_loop, Connector};
pub use dispatcher::Dispatcher;
pub use fuser::{Fuser, SystemPromptSections};
pub use io_state::IoState;
pub use llm::{LlmBackend, LlmOutcome, OpenAiCompatibleBackend};
pub use message::Message;
pub use orchestrator::{InputOrchestrator, SharedSensors};
pub use registry::Registry;
pub use runtime::Runtime;
pub use sensor::{poll_loop, push_stream, Poller, RawEvent, Sensor};
pub use stop_signal::StopSignal;
