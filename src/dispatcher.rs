use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, Notify};

use crate::abort_guard::AbortGuard;
use crate::action::{Action, AgentAction};
use crate::connector::Connector;
use crate::stop_signal::StopSignal;

/// A single-slot, drop-oldest mailbox plus the worker that drains it.
///
/// Depth 1 rather than a bounded FIFO: a connector that falls behind
/// should act on the LLM's *most recent* intent for it, not replay a
/// backlog of stale ones.
struct ConnectorWorker {
    mailbox: Mutex<Option<Action>>,
    notify: Notify,
}

impl ConnectorWorker {
    fn new() -> Self {
        Self {
            mailbox: Mutex::new(None),
            notify: Notify::new(),
        }
    }

    async fn push(&self, action: Action) {
        *self.mailbox.lock().await = Some(action);
        self.notify.notify_one();
    }
}

/// Routes LLM-chosen [`Action`]s to the registered [`Connector`] for each
/// action's type, serializing dispatch per connector while letting
/// different connectors run concurrently.
pub struct Dispatcher {
    /// `AgentAction::llm_label` -> registered action metadata.
    actions: HashMap<String, AgentAction>,
    workers: HashMap<String, Arc<ConnectorWorker>>,
    _guards: Vec<AbortGuard>,
}

impl Dispatcher {
    /// Spawn one worker task per distinct connector named in `actions`,
    /// each serially draining its own mailbox against `connectors`.
    pub fn new(
        actions: Vec<AgentAction>,
        connectors: HashMap<String, Arc<dyn Connector>>,
        stop: StopSignal,
    ) -> Self {
        let mut workers = HashMap::new();
        let mut guards = Vec::new();

        for connector_name in connectors.keys() {
            let worker = Arc::new(ConnectorWorker::new());
            let connector = connectors.get(connector_name).unwrap().clone();
            let worker_for_task = worker.clone();
            let stop = stop.clone();
            let handle = tokio::spawn(async move {
                loop {
                    tokio::select! {
                        _ = worker_for_task.notify.notified() => {}
                        _ = stop.cancelled() => break,
                    }
                    let action = worker_for_task.mailbox.lock().await.take();
                    let Some(action) = action else { continue };
                    if let Err(e) = connector.connect(&action).await {
                        tracing::warn!(
                            connector = connector.name(),
                            error = %e,
                            "connector dispatch failed"
                        );
                    }
                    if stop.is_stopped() {
                        break;
                    }
                }
            });
            guards.push(AbortGuard::new(handle));
            workers.insert(connector_name.clone(), worker);
        }

        let actions = actions
            .into_iter()
            .map(|a| (a.llm_label.clone(), a))
            .collect();

        Self {
            actions,
            workers,
            _guards: guards,
        }
    }

    /// All actions this dispatcher was built with, for the Fuser's action
    /// catalog.
    pub fn registered_actions(&self) -> Vec<AgentAction> {
        self.actions.values().cloned().collect()
    }

    /// Look up the registered action by `action.action_type` and enqueue it
    /// on that action's connector, dropping whatever was previously queued.
    /// Unknown action types are logged and dropped rather than treated as
    /// fatal, since a single malformed tool call should not end the run.
    pub async fn dispatch(&self, action: Action) {
        let Some(agent_action) = self.actions.get(&action.action_type) else {
            tracing::warn!(action_type = %action.action_type, "no registered action for dispatched type");
            return;
        };
        let Some(worker) = self.workers.get(&agent_action.connector) else {
            tracing::warn!(connector = %agent_action.connector, "no registered connector for action");
            return;
        };
        worker.push(action).await;
    }
}
