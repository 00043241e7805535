use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::abort_guard::AbortGuard;
use crate::background::{run_background, BackgroundTask};
use crate::config::ModeConfig;
use crate::connector::{run_tick_loop, Connector};
use crate::dispatcher::Dispatcher;
use crate::fuser::{Fuser, SystemPromptSections};
use crate::io_state::IoState;
use crate::llm::{LlmBackend, LlmOutcome};
use crate::message::monotonic_seconds;
use crate::orchestrator::{InputOrchestrator, SharedSensors};
use crate::registry::Registry;
use crate::stop_signal::StopSignal;

/// The Runtime exclusively owns every sensor, connector, background, and
/// the LLM Adapter. Nothing else in the process holds these directly;
/// cross-component communication happens only through
/// [`crate::providers`] singletons reachable from this struct's fields.
pub struct Runtime {
    sensors: SharedSensors,
    sensor_count: usize,
    io_state: Arc<IoState>,
    fuser: Fuser,
    llm: Arc<dyn LlmBackend>,
    dispatcher: Arc<Dispatcher>,
    backgrounds: Vec<Arc<dyn BackgroundTask>>,
    connectors: HashMap<String, Arc<dyn Connector>>,
    hertz: f64,
    stop: StopSignal,
    worker_guards: Mutex<Vec<AbortGuard>>,
}

impl Runtime {
    pub fn build(mode: ModeConfig) -> Result<Self, crate::error::ConfigError> {
        Registry::validate_mode(&mode)?;

        let raw_sensors = Registry::build_sensors(&mode.agent_inputs)?;
        let sensor_count = raw_sensors.len();
        let sensors: SharedSensors = Arc::new(Mutex::new(raw_sensors));

        let agent_actions = Registry::build_agent_actions(&mode.agent_actions);

        let mut connectors: HashMap<String, Arc<dyn Connector>> = HashMap::new();
        for entry in &mode.agent_actions {
            let connector = Registry::build_connector(entry)?;
            connectors.insert(entry.connector.clone(), connector);
        }

        let backgrounds = Registry::build_backgrounds(&mode.backgrounds)?;
        let llm = Registry::build_llm_backend(&mode.cortex_llm)?;
        let stop = StopSignal::new();

        let dispatcher = Arc::new(Dispatcher::new(agent_actions, connectors.clone(), stop.clone()));

        let fuser = Fuser::new(SystemPromptSections {
            base: mode.system_prompt_base.clone(),
            governance: mode.system_governance.clone(),
            examples: mode.system_prompt_examples.clone(),
        });

        Ok(Self {
            sensors,
            sensor_count,
            io_state: Arc::new(IoState::new()),
            fuser,
            llm,
            dispatcher,
            backgrounds,
            connectors,
            hertz: mode.hertz.max(0.01),
            stop,
            worker_guards: Mutex::new(Vec::new()),
        })
    }

    pub fn stop_signal(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Spawn sensor ingestion, background tasks, and connector ticks, then
    /// drive the fuse/LLM/dispatch loop on the configured cadence until
    /// `stop` fires.
    pub async fn run(&self) {
        let orchestrator = InputOrchestrator::spawn(
            self.sensors.clone(),
            self.sensor_count,
            self.io_state.clone(),
            self.stop.clone(),
        );
        tracing::info!(sensor_tasks = orchestrator.task_count(), "sensors online");

        let mut guards = self.worker_guards.lock().await;
        for background in &self.backgrounds {
            let background = background.clone();
            let stop = self.stop.clone();
            let handle = tokio::spawn(async move {
                run_background(background.as_ref(), stop).await;
            });
            guards.push(AbortGuard::new(handle));
        }
        for connector in self.connectors.values() {
            let connector = connector.clone();
            let stop = self.stop.clone();
            let handle = tokio::spawn(async move {
                run_tick_loop(connector.as_ref(), stop).await;
            });
            guards.push(AbortGuard::new(handle));
        }
        drop(guards);

        let period = Duration::from_secs_f64(1.0 / self.hertz);
        loop {
            if self.stop.is_stopped() {
                return;
            }
            self.tick().await;
            if !self.stop.sleep(period).await {
                return;
            }
        }
    }

    /// One fuse -> LLM -> dispatch cycle, strictly sequential: the LLM
    /// never sees a prompt built from stale sensor state, and dispatch
    /// never fires on an action the LLM didn't just choose.
    async fn tick(&self) {
        let agent_actions = self.dispatcher.registered_actions();

        let prompt = {
            let mut sensors = self.sensors.lock().await;
            self.fuser.fuse(&mut sensors[..], &agent_actions, &self.io_state)
        };

        self.io_state.mark_llm_start(monotonic_seconds());
        let outcome = self.llm.choose_action(&prompt, &agent_actions, &self.stop).await;
        self.io_state.mark_llm_end(monotonic_seconds());

        match outcome {
            LlmOutcome::ToolCalls(actions) => {
                for action in actions {
                    self.dispatcher.dispatch(action).await;
                }
            }
            LlmOutcome::Content(content) => {
                tracing::debug!(%content, "LLM responded with content only, no action dispatched");
            }
            LlmOutcome::Error(err) => {
                tracing::warn!(error = %err, "LLM turn failed; skipping this tick's dispatch");
            }
        }
    }
}
